/*!
    Video scaler implementation.
*/

use ffmpeg_next::{
    format::Pixel,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use media_types::{Error, PixelFormat, Rational, Result, VideoFrame};

/**
    Scaling algorithm for resolution conversion.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScalingAlgorithm {
    /// Fastest, lowest quality
    FastBilinear,
    /// Good speed/quality balance (the default)
    #[default]
    Bilinear,
    /// Higher quality, slower
    Bicubic,
    /// Highest quality downscaling
    Lanczos,
}

impl ScalingAlgorithm {
    fn flags(self) -> ScalingFlags {
        match self {
            Self::FastBilinear => ScalingFlags::FAST_BILINEAR,
            Self::Bilinear => ScalingFlags::BILINEAR,
            Self::Bicubic => ScalingFlags::BICUBIC,
            Self::Lanczos => ScalingFlags::LANCZOS,
        }
    }
}

/**
    Destination side of a scaling context.
*/
#[derive(Clone, Copy, Debug)]
pub struct ScalerConfig {
    /// Destination width in pixels.
    pub width: u32,
    /// Destination height in pixels.
    pub height: u32,
    /// Destination pixel format.
    pub format: PixelFormat,
    /// Scaling algorithm.
    pub algorithm: ScalingAlgorithm,
}

impl ScalerConfig {
    /**
        Create a new scaler configuration.
    */
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            algorithm: ScalingAlgorithm::default(),
        }
    }

    /**
        Configuration targeting planar YUV 4:2:0 (encoder input).
    */
    pub fn to_yuv420p(width: u32, height: u32) -> Self {
        Self::new(width, height, PixelFormat::Yuv420p)
    }

    /**
        Configuration targeting packed RGB24 (pixel-level compositing).
    */
    pub fn to_rgb24(width: u32, height: u32) -> Self {
        Self::new(width, height, PixelFormat::Rgb24)
    }

    /**
        Set the scaling algorithm.
    */
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/**
    Converter between two (resolution, pixel format) pairs.

    The destination side is fixed at construction; the source side is
    captured from the first frame and the context is recreated whenever
    the source geometry changes.
*/
pub struct VideoScaler {
    config: ScalerConfig,
    context: Option<ScalingContext>,
    source: Option<(u32, u32, Pixel)>,
}

impl VideoScaler {
    /**
        Create a new scaler. The underlying context is built lazily on the
        first call to [`scale`](VideoScaler::scale).
    */
    pub fn new(config: ScalerConfig) -> Self {
        Self {
            config,
            context: None,
            source: None,
        }
    }

    /**
        Destination configuration of this scaler.
    */
    pub fn config(&self) -> &ScalerConfig {
        &self.config
    }

    /**
        Convert one frame to the destination resolution and pixel format.

        The input frame's presentation timestamp and time base carry over
        to the output frame.
    */
    pub fn scale(&mut self, frame: &VideoFrame) -> Result<VideoFrame> {
        frame.check_layout()?;

        let src_format = pixel_format_to_ffmpeg(frame.format);
        let src_key = (frame.width, frame.height, src_format);
        if self.context.is_none() || self.source != Some(src_key) {
            self.context = Some(
                ScalingContext::get(
                    src_format,
                    frame.width,
                    frame.height,
                    pixel_format_to_ffmpeg(self.config.format),
                    self.config.width,
                    self.config.height,
                    self.config.algorithm.flags(),
                )
                .map_err(|e| Error::unsupported_format(e.to_string()))?,
            );
            self.source = Some(src_key);
        }

        let input = fill_ffmpeg_frame(frame, src_format);
        let mut output = VideoFrameFFmpeg::empty();
        self.context
            .as_mut()
            .expect("scaling context initialized above")
            .run(&input, &mut output)
            .map_err(|e| Error::invalid_frame(format!("scaling failed: {e}")))?;

        let mut scaled = pack_ffmpeg_frame(&output, self.config.format, frame.time_base);
        scaled.pts = frame.pts;
        Ok(scaled)
    }
}

impl std::fmt::Debug for VideoScaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoScaler")
            .field("config", &self.config)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/**
    Copy a packed frame into a freshly allocated FFmpeg frame.
*/
fn fill_ffmpeg_frame(frame: &VideoFrame, format: Pixel) -> VideoFrameFFmpeg {
    let mut out = VideoFrameFFmpeg::new(format, frame.width, frame.height);
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
    out
}

/**
    Copy an FFmpeg frame into a tightly packed [`VideoFrame`].
*/
fn pack_ffmpeg_frame(frame: &VideoFrameFFmpeg, format: PixelFormat, time_base: Rational) -> VideoFrame {
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
    VideoFrame::new(data, width, height, format, None, time_base)
}

/**
    Convert our PixelFormat to an FFmpeg pixel format.
*/
fn pixel_format_to_ffmpeg(format: PixelFormat) -> Pixel {
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

#[cfg(test)]
mod tests {
    use super::*;
    use media_types::{Pts, Rational};

    const TB_1_25: Rational = Rational { num: 1, den: 25 };

    fn solid_rgb24(width: u32, height: u32, rgb: [u8; 3]) -> VideoFrame {
        let mut frame = VideoFrame::alloc(PixelFormat::Rgb24, width, height, TB_1_25);
        for pixel in frame.data.chunks_exact_mut(3) {
            pixel.copy_from_slice(&rgb);
        }
        frame
    }

    #[test]
    fn scale_to_yuv420p() {
        let mut scaler = VideoScaler::new(ScalerConfig::to_yuv420p(320, 240));
        let frame = solid_rgb24(640, 480, [255, 0, 0]);

        let scaled = scaler.scale(&frame).unwrap();
        assert_eq!(scaled.width, 320);
        assert_eq!(scaled.height, 240);
        assert_eq!(scaled.format, PixelFormat::Yuv420p);
        assert_eq!(scaled.data.len(), 320 * 240 * 3 / 2);
        assert!(scaled.check_layout().is_ok());
    }

    #[test]
    fn solid_input_scales_to_solid_output() {
        let mut scaler = VideoScaler::new(ScalerConfig::to_yuv420p(100, 100));
        let frame = solid_rgb24(200, 200, [0, 255, 0]);

        let scaled = scaler.scale(&frame).unwrap();
        let luma = scaled.plane_data(0);
        let first = luma[0];
        assert!(luma.iter().all(|&v| v.abs_diff(first) <= 1));
    }

    #[test]
    fn pts_passes_through() {
        let mut scaler = VideoScaler::new(ScalerConfig::to_rgb24(50, 50));
        let mut frame = solid_rgb24(100, 100, [1, 2, 3]);
        frame.pts = Some(Pts(42));

        let scaled = scaler.scale(&frame).unwrap();
        assert_eq!(scaled.pts, Some(Pts(42)));
        assert_eq!(scaled.time_base, TB_1_25);
    }

    #[test]
    fn source_change_recreates_context() {
        let mut scaler = VideoScaler::new(ScalerConfig::to_rgb24(64, 64));

        let a = solid_rgb24(128, 128, [10, 20, 30]);
        let b = solid_rgb24(256, 128, [10, 20, 30]);

        let out_a = scaler.scale(&a).unwrap();
        let out_b = scaler.scale(&b).unwrap();
        assert_eq!(out_a.width, 64);
        assert_eq!(out_b.width, 64);
        assert_eq!(scaler.source, Some((256, 128, Pixel::RGB24)));
    }

    #[test]
    fn bad_layout_rejected() {
        let mut scaler = VideoScaler::new(ScalerConfig::to_rgb24(64, 64));
        let frame = VideoFrame::new(vec![0u8; 7], 100, 100, PixelFormat::Rgb24, None, TB_1_25);
        assert!(matches!(
            scaler.scale(&frame),
            Err(Error::InvalidFrame { .. })
        ));
    }
}
