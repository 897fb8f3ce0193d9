/*!
    Pipelines that turn still images and videos into MPEG-1 clips.

    Each pipeline is a short, synchronous sequence: open one or two decode
    sessions, derive an encoder configuration, build a scaler between the
    decoded and encoded geometry, then pull, scale, stamp, and encode
    until a fixed frame count or input exhaustion, then finalize.

    The binaries in `src/bin/` are thin argument parsers over these
    functions; everything here returns `Result` so the pipelines stay
    embeddable and testable.
*/

pub use media_types::{CodecId, Error, PixelFormat, Pts, Rational, Result, VideoFrame};

pub mod config;
pub mod overlay;
pub mod pattern;
pub mod pipeline;

pub use config::ClipSettings;
pub use pipeline::{
    EncodeReport, MediaSummary, image_over_video, image_pair_to_video, image_then_video,
    image_to_video, probe_media, synthetic_video,
};
