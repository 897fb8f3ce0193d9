/*!
    Video encode session.
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ffmpeg_next::{
    codec, encoder,
    ffi,
    util::frame::video::Video as VideoFrameFFmpeg,
};

use media_types::{CodecId, Error, PixelFormat, Pts, Result, VideoFrame};

use crate::config::VideoEncoderConfig;

/// MPEG-1/2 sequence-end code terminating a raw elementary stream.
pub const SEQUENCE_END_CODE: [u8; 4] = [0x00, 0x00, 0x01, 0xB7];

/**
    Video encode session.

    Owns the opened encoder and the output file. Frames go in through
    [`encode`](VideoEncoder::encode); compressed packets come out as raw
    bytes appended to the file. [`finish`](VideoEncoder::finish) drains
    the encoder's delayed-frame queue, terminates the stream, and must be
    called exactly once.
*/
pub struct VideoEncoder {
    encoder: encoder::video::Encoder,
    writer: BufWriter<File>,
    path: PathBuf,
    config: VideoEncoderConfig,
    frames_in: u64,
    packets_out: u64,
    finished: bool,
}

impl VideoEncoder {
    /**
        Create an encode session writing to `path`.

        # Errors

        - [`Error::UnsupportedCodec`] if no encoder is registered for the
          configured codec
        - [`Error::EncodeFailure`] if the encoder rejects the configuration
        - [`Error::Io`] if the output file cannot be created
    */
    pub fn create(path: impl AsRef<Path>, config: VideoEncoderConfig) -> Result<Self> {
        let path = path.as_ref();

        ffmpeg_next::init().map_err(|e| Error::encode(e.to_string()))?;

        let codec = encoder::find(codec_id_to_ffmpeg(config.codec))
            .ok_or_else(|| Error::unsupported_codec(config.codec.name()))?;

        let mut video = codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(|e| Error::encode(e.to_string()))?;
        video.set_width(config.width);
        video.set_height(config.height);
        video.set_format(pixel_format_to_ffmpeg(config.format));
        video.set_time_base(ffmpeg_next::Rational::new(
            config.time_base.num,
            config.time_base.den,
        ));
        video.set_frame_rate(Some(ffmpeg_next::Rational::new(
            config.time_base.den,
            config.time_base.num,
        )));
        video.set_bit_rate(config.bit_rate);
        video.set_gop(config.gop_size);
        video.set_max_b_frames(config.max_b_frames);

        let encoder = video
            .open()
            .map_err(|e| Error::encode(format!("could not open {}: {e}", config.codec.name())))?;

        let file = File::create(path)?;

        log::debug!(
            "encoding {}: {}x{} {:?} at {} bps, gop {}, max b-frames {}",
            path.display(),
            config.width,
            config.height,
            config.codec,
            config.bit_rate,
            config.gop_size,
            config.max_b_frames,
        );

        Ok(Self {
            encoder,
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            config,
            frames_in: 0,
            packets_out: 0,
            finished: false,
        })
    }

    /**
        Configuration this session was created with.
    */
    pub fn config(&self) -> &VideoEncoderConfig {
        &self.config
    }

    /**
        Number of frames accepted so far.
    */
    pub fn frames_encoded(&self) -> u64 {
        self.frames_in
    }

    /**
        Number of compressed packets written so far.
    */
    pub fn packets_written(&self) -> u64 {
        self.packets_out
    }

    /**
        Push one frame into the encoder and write any produced packets.

        Frames without a presentation timestamp are stamped with the next
        sequential value.

        # Errors

        - [`Error::Finished`] if [`finish`](VideoEncoder::finish) has
          already been called
        - [`Error::InvalidFrame`] if the frame's geometry or format does
          not match the configuration
        - [`Error::EncodeFailure`] on encoder failure
    */
    pub fn encode(&mut self, frame: &VideoFrame) -> Result<()> {
        if self.finished {
            return Err(Error::Finished);
        }
        if frame.width != self.config.width
            || frame.height != self.config.height
            || frame.format != self.config.format
        {
            return Err(Error::invalid_frame(format!(
                "expected {}x{} {:?}, got {}x{} {:?}",
                self.config.width,
                self.config.height,
                self.config.format,
                frame.width,
                frame.height,
                frame.format
            )));
        }
        frame.check_layout()?;

        let pts = frame.pts.unwrap_or(Pts(self.frames_in as i64));
        let input = fill_ffmpeg_frame(frame, pts);

        self.encoder
            .send_frame(&input)
            .map_err(|e| Error::encode(e.to_string()))?;
        self.frames_in += 1;

        self.write_pending_packets()
    }

    /**
        Finalize the stream.

        Drains the encoder's delayed-frame queue, appends the sequence-end
        code for MPEG-1/2 targets, and flushes the file. Not idempotent:
        exactly one call per session, and further `encode` or `finish`
        calls are rejected with [`Error::Finished`].
    */
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Err(Error::Finished);
        }

        self.encoder
            .send_eof()
            .map_err(|e| Error::encode(e.to_string()))?;
        self.write_pending_packets()?;

        if self.config.codec.uses_sequence_end_code() {
            self.writer.write_all(&SEQUENCE_END_CODE)?;
        }
        self.writer.flush()?;
        self.finished = true;

        log::debug!(
            "finished {}: {} frames in, {} packets out",
            self.path.display(),
            self.frames_in,
            self.packets_out,
        );
        Ok(())
    }

    /**
        Write every packet the encoder currently has ready.
    */
    fn write_pending_packets(&mut self) -> Result<()> {
        let mut packet = ffmpeg_next::Packet::empty();
        loop {
            match self.encoder.receive_packet(&mut packet) {
                Ok(()) => {
                    if let Some(data) = packet.data() {
                        self.writer.write_all(data)?;
                        self.packets_out += 1;
                    }
                }
                // EAGAIN is reported raw or sign-normalized depending on
                // the bindings version; accept both.
                Err(ffmpeg_next::Error::Other { errno })
                    if errno == ffi::EAGAIN || errno == ffi::AVERROR(ffi::EAGAIN) =>
                {
                    break;
                }
                Err(ffmpeg_next::Error::Eof) => {
                    break;
                }
                Err(e) => {
                    return Err(Error::encode(e.to_string()));
                }
            }
        }
        Ok(())
    }
}

impl Drop for VideoEncoder {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!(
                "encoder for {} dropped without finish; stream has no end marker",
                self.path.display()
            );
        }
    }
}

impl std::fmt::Debug for VideoEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoEncoder")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("frames_in", &self.frames_in)
            .field("packets_out", &self.packets_out)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/**
    Copy a packed frame into a freshly allocated FFmpeg frame with the
    given timestamp.
*/
fn fill_ffmpeg_frame(frame: &VideoFrame, pts: Pts) -> VideoFrameFFmpeg {
    let mut out = VideoFrameFFmpeg::new(
        pixel_format_to_ffmpeg(frame.format),
        frame.width,
        frame.height,
    );
    let planes = frame.format.planes(frame.width, frame.height);
    for (index, plane) in planes.iter().enumerate() {
        let stride = out.stride(index);
        let src = frame.plane_data(index);
        let dst = out.data_mut(index);
        for row in 0..plane.rows {
            dst[row * stride..row * stride + plane.row_bytes]
                .copy_from_slice(&src[row * plane.row_bytes..(row + 1) * plane.row_bytes]);
        }
    }
    out.set_pts(Some(pts.0));
    out
}

/**
    Convert our CodecId to an FFmpeg codec id.
*/
fn codec_id_to_ffmpeg(codec: CodecId) -> codec::Id {
    match codec {
        CodecId::Mpeg1Video => codec::Id::MPEG1VIDEO,
        CodecId::Mpeg2Video => codec::Id::MPEG2VIDEO,
        CodecId::Mpeg4 => codec::Id::MPEG4,
        CodecId::H264 => codec::Id::H264,
        CodecId::H265 => codec::Id::HEVC,
    }
}

/**
    Convert our PixelFormat to an FFmpeg pixel format.
*/
fn pixel_format_to_ffmpeg(format: PixelFormat) -> ffmpeg_next::format::Pixel {
    use ffmpeg_next::format::Pixel;

    match format {
        PixelFormat::Yuv420p => Pixel::YUV420P,
        PixelFormat::Yuvj420p => Pixel::YUVJ420P,
        PixelFormat::Yuv422p => Pixel::YUV422P,
        PixelFormat::Yuvj422p => Pixel::YUVJ422P,
        PixelFormat::Yuv444p => Pixel::YUV444P,
        PixelFormat::Yuvj444p => Pixel::YUVJ444P,
        PixelFormat::Nv12 => Pixel::NV12,
        PixelFormat::Gray8 => Pixel::GRAY8,
        PixelFormat::Rgb24 => Pixel::RGB24,
        PixelFormat::Bgr24 => Pixel::BGR24,
        PixelFormat::Rgba => Pixel::RGBA,
        PixelFormat::Bgra => Pixel::BGRA,
    }
}
