/*!
    Video decode session.
*/

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    codec,
    decoder::Video as VideoDecoderFFmpeg,
    ffi, format,
    format::context::Input,
    media,
    util::frame::video::Video as VideoFrameFFmpeg,
};

use media_types::{Error, PixelFormat, Pts, Rational, Result, VideoFrame};

/**
    Video decode session.

    Owns the demux context, the selected stream index, and the opened
    decoder. Construction locates a usable video stream or fails; frames
    are pulled one at a time with [`next_frame`](VideoDecoder::next_frame).
*/
pub struct VideoDecoder {
    input: Input,
    decoder: VideoDecoderFFmpeg,
    path: PathBuf,
    stream_index: usize,
    time_base: Rational,
    format: PixelFormat,
    eof_sent: bool,
}

impl VideoDecoder {
    /**
        Open a media or image file and locate its video stream.

        # Errors

        - [`Error::Open`] if the container cannot be parsed
        - [`Error::StreamNotFound`] if it holds no video stream
        - [`Error::UnsupportedCodec`] if no decoder exists for the stream
        - [`Error::UnsupportedFormat`] if the decoded pixel format is
          outside the [`PixelFormat`] vocabulary
    */
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        ffmpeg_next::init().map_err(|e| Error::open(e.to_string()))?;

        let input = format::input(&path)
            .map_err(|e| Error::open(format!("{}: {e}", path.display())))?;

        let stream = input
            .streams()
            .best(media::Type::Video)
            .ok_or(Error::StreamNotFound)?;
        let stream_index = stream.index();
        let time_base = rational_from_ffmpeg(stream.time_base());

        let decoder_ctx = codec::context::Context::from_parameters(stream.parameters())
            .map_err(|e| Error::open(e.to_string()))?;

        let decoder = decoder_ctx.decoder().video().map_err(|e| match e {
            ffmpeg_next::Error::DecoderNotFound => {
                Error::unsupported_codec(format!("stream {stream_index} of {}", path.display()))
            }
            other => Error::open(other.to_string()),
        })?;

        let format = pixel_format_from_ffmpeg(decoder.format()).ok_or_else(|| {
            Error::unsupported_format(format!(
                "decoder output format {:?} of {}",
                decoder.format(),
                path.display()
            ))
        })?;

        log::debug!(
            "opened {}: stream {stream_index}, {}x{} {format:?}, time base {time_base}",
            path.display(),
            decoder.width(),
            decoder.height(),
        );

        Ok(Self {
            input,
            decoder,
            path: path.to_path_buf(),
            stream_index,
            time_base,
            format,
            eof_sent: false,
        })
    }

    /**
        Width of the decoded stream in pixels.
    */
    pub fn width(&self) -> u32 {
        self.decoder.width()
    }

    /**
        Height of the decoded stream in pixels.
    */
    pub fn height(&self) -> u32 {
        self.decoder.height()
    }

    /**
        Pixel format of the decoded stream.
    */
    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    /**
        Time base of the selected stream.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Index of the selected stream within the container.
    */
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /**
        Pull the next decoded frame.

        Reads container packets, routing only the selected stream to the
        decoder, until a frame completes. At end of input the decoder is
        drained of delayed frames; after that every call returns
        `Ok(None)`.

        # Errors

        [`Error::DecodeFailure`] if a routed packet fails to decode. The
        failure is fatal: the session stays usable only for property
        accessors afterwards.
    */
    pub fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        let mut decoded = VideoFrameFFmpeg::empty();

        loop {
            match self.decoder.receive_frame(&mut decoded) {
                Ok(()) => return Ok(Some(self.convert_frame(&decoded)?)),
                // EAGAIN is reported raw or sign-normalized depending on
                // the bindings version; accept both.
                Err(ffmpeg_next::Error::Other { errno })
                    if errno == ffi::EAGAIN || errno == ffi::AVERROR(ffi::EAGAIN) =>
                {
                    // Decoder wants more input before it can emit a frame.
                }
                Err(ffmpeg_next::Error::Eof) => return Ok(None),
                Err(e) => return Err(Error::decode(e.to_string())),
            }

            if !self.send_next_packet()? && !self.eof_sent {
                self.decoder
                    .send_eof()
                    .map_err(|e| Error::decode(e.to_string()))?;
                self.eof_sent = true;
            }
        }
    }

    /**
        Read container packets until one belonging to the selected stream
        has been sent to the decoder. Returns false once the container is
        exhausted.

        Packet storage from the previous read is released when the packet
        goes out of scope, so buffering never grows across calls.
    */
    fn send_next_packet(&mut self) -> Result<bool> {
        if self.eof_sent {
            return Ok(false);
        }
        let stream_index = self.stream_index;
        for (stream, packet) in self.input.packets() {
            if stream.index() != stream_index {
                continue;
            }
            self.decoder
                .send_packet(&packet)
                .map_err(|e| Error::decode(e.to_string()))?;
            return Ok(true);
        }
        Ok(false)
    }

    /**
        Copy an FFmpeg frame into a tightly packed [`VideoFrame`].
    */
    fn convert_frame(&self, frame: &VideoFrameFFmpeg) -> Result<VideoFrame> {
        let format = pixel_format_from_ffmpeg(frame.format()).ok_or_else(|| {
            Error::unsupported_format(format!("frame format {:?}", frame.format()))
        })?;
        let (width, height) = (frame.width(), frame.height());

        let planes = format.planes(width, height);
        let mut data = Vec::with_capacity(format.buffer_size(width, height));
        for (index, plane) in planes.iter().enumerate() {
            let stride = frame.stride(index);
            let src = frame.data(index);
            for row in 0..plane.rows {
                let offset = row * stride;
                data.extend_from_slice(&src[offset..offset + plane.row_bytes]);
            }
        }

        Ok(VideoFrame::new(
            data,
            width,
            height,
            format,
            frame.pts().map(Pts),
            self.time_base,
        ))
    }
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("path", &self.path)
            .field("stream_index", &self.stream_index)
            .field("width", &self.decoder.width())
            .field("height", &self.decoder.height())
            .field("format", &self.format)
            .field("time_base", &self.time_base)
            .finish_non_exhaustive()
    }
}

/**
    Convert an FFmpeg pixel format to our PixelFormat.
*/
fn pixel_format_from_ffmpeg(format: ffmpeg_next::format::Pixel) -> Option<PixelFormat> {
    use ffmpeg_next::format::Pixel;

    match format {
        Pixel::YUV420P => Some(PixelFormat::Yuv420p),
        Pixel::YUVJ420P => Some(PixelFormat::Yuvj420p),
        Pixel::YUV422P => Some(PixelFormat::Yuv422p),
        Pixel::YUVJ422P => Some(PixelFormat::Yuvj422p),
        Pixel::YUV444P => Some(PixelFormat::Yuv444p),
        Pixel::YUVJ444P => Some(PixelFormat::Yuvj444p),
        Pixel::NV12 => Some(PixelFormat::Nv12),
        Pixel::GRAY8 => Some(PixelFormat::Gray8),
        Pixel::RGB24 => Some(PixelFormat::Rgb24),
        Pixel::BGR24 => Some(PixelFormat::Bgr24),
        Pixel::RGBA => Some(PixelFormat::Rgba),
        Pixel::BGRA => Some(PixelFormat::Bgra),
        _ => None,
    }
}

fn rational_from_ffmpeg(value: ffmpeg_next::Rational) -> Rational {
    // An unset stream time base comes through with a zero denominator.
    if value.denominator() == 0 {
        return Rational::new(0, 1);
    }
    Rational::new(value.numerator(), value.denominator())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_fails() {
        let err = VideoDecoder::open("/nonexistent/clip.mpg").unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn pixel_format_mapping() {
        use ffmpeg_next::format::Pixel;

        assert_eq!(
            pixel_format_from_ffmpeg(Pixel::YUV420P),
            Some(PixelFormat::Yuv420p)
        );
        assert_eq!(
            pixel_format_from_ffmpeg(Pixel::RGB24),
            Some(PixelFormat::Rgb24)
        );
        assert_eq!(pixel_format_from_ffmpeg(Pixel::YUV410P), None);
    }
}
