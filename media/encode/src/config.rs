/*!
    Encoder configuration types.
*/

use media_types::{CodecId, PixelFormat, Rational};

/**
    Configuration for a video encode session.

    Every knob is explicit; nothing is read from ambient state. The
    defaults baked into [`mpeg1`](VideoEncoderConfig::mpeg1) are the ones
    the pipeline drivers ship with.
*/
#[derive(Clone, Copy, Debug)]
pub struct VideoEncoderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Pixel format frames must arrive in.
    pub format: PixelFormat,
    /// Target bit rate in bits per second.
    pub bit_rate: usize,
    /// Time base of frame timestamps (1/fps for fixed frame rates).
    pub time_base: Rational,
    /// Group-of-pictures size (distance between keyframes).
    pub gop_size: u32,
    /// Maximum number of consecutive B-frames.
    pub max_b_frames: usize,
    /// Codec to encode with.
    pub codec: CodecId,
}

impl VideoEncoderConfig {
    /**
        MPEG-1 configuration with the driver defaults: 200 kbit/s,
        GOP 25, one B-frame, YUV 4:2:0 input.
    */
    pub fn mpeg1(width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Yuv420p,
            bit_rate: 200_000,
            time_base: Rational::per_second(fps),
            gop_size: 25,
            max_b_frames: 1,
            codec: CodecId::Mpeg1Video,
        }
    }

    /**
        Set the target bit rate.
    */
    pub fn with_bit_rate(mut self, bit_rate: usize) -> Self {
        self.bit_rate = bit_rate;
        self
    }

    /**
        Set the group-of-pictures size.
    */
    pub fn with_gop_size(mut self, gop_size: u32) -> Self {
        self.gop_size = gop_size;
        self
    }

    /**
        Set the maximum number of consecutive B-frames.
    */
    pub fn with_max_b_frames(mut self, max_b_frames: usize) -> Self {
        self.max_b_frames = max_b_frames;
        self
    }

    /**
        Set the input pixel format.
    */
    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /**
        Set the codec.
    */
    pub fn with_codec(mut self, codec: CodecId) -> Self {
        self.codec = codec;
        self
    }

    /**
        Set the time base.
    */
    pub fn with_time_base(mut self, time_base: Rational) -> Self {
        self.time_base = time_base;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mpeg1_defaults() {
        let config = VideoEncoderConfig::mpeg1(640, 480, 25);
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.format, PixelFormat::Yuv420p);
        assert_eq!(config.bit_rate, 200_000);
        assert_eq!(config.time_base, Rational::new(1, 25));
        assert_eq!(config.gop_size, 25);
        assert_eq!(config.max_b_frames, 1);
        assert_eq!(config.codec, CodecId::Mpeg1Video);
    }

    #[test]
    fn builder_overrides() {
        let config = VideoEncoderConfig::mpeg1(320, 240, 30)
            .with_bit_rate(400_000)
            .with_gop_size(10)
            .with_max_b_frames(0);
        assert_eq!(config.bit_rate, 400_000);
        assert_eq!(config.gop_size, 10);
        assert_eq!(config.max_b_frames, 0);
    }
}
