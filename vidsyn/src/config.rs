/*!
    Shared pipeline settings.
*/

use media_encode::VideoEncoderConfig;
use media_types::CodecId;

/// Frame rate every driver encodes at unless overridden.
pub const DEFAULT_FPS: u32 = 25;

/**
    Encoder knobs shared by all pipelines.

    Passed explicitly into every pipeline function; there is no ambient
    configuration.
*/
#[derive(Clone, Copy, Debug)]
pub struct ClipSettings {
    /// Frames per second of the output stream.
    pub fps: u32,
    /// Target bit rate in bits per second.
    pub bit_rate: usize,
    /// Group-of-pictures size.
    pub gop_size: u32,
    /// Maximum number of consecutive B-frames.
    pub max_b_frames: usize,
    /// Output codec.
    pub codec: CodecId,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            bit_rate: 200_000,
            gop_size: 25,
            max_b_frames: 1,
            codec: CodecId::Mpeg1Video,
        }
    }
}

impl ClipSettings {
    /**
        Encoder configuration for an output of the given resolution.
    */
    pub fn encoder_config(&self, width: u32, height: u32) -> VideoEncoderConfig {
        VideoEncoderConfig::mpeg1(width, height, self.fps)
            .with_bit_rate(self.bit_rate)
            .with_gop_size(self.gop_size)
            .with_max_b_frames(self.max_b_frames)
            .with_codec(self.codec)
    }

    /**
        Number of frames covering `seconds` of output.
    */
    pub fn frames_for(&self, seconds: u32) -> u64 {
        u64::from(self.fps) * u64::from(seconds)
    }
}
