/*!
    Elementary stream encoding for the media crate family.

    This crate is the output side of the pipeline. It feeds raw frames to
    an FFmpeg encoder and writes the produced packets straight to a file
    as a raw video elementary stream, with no container and no muxer.
    MPEG-1/2 streams are finalized with the 4-byte sequence-end code.

    # Example

    ```ignore
    use media_encode::{VideoEncoder, VideoEncoderConfig};

    let config = VideoEncoderConfig::mpeg1(640, 480, 25);
    let mut encoder = VideoEncoder::create("clip.mpg", config)?;

    for frame in frames {
        encoder.encode(&frame)?;
    }

    // Drains delayed packets, appends the sequence-end code, flushes.
    encoder.finish()?;
    ```

    # Finalization

    `finish` must be called exactly once. Without it the delayed-frame
    queue inside the encoder is lost and the stream has no end marker;
    after it, the session rejects further use with [`Error::Finished`].
*/

pub use media_types::{CodecId, Error, PixelFormat, Rational, Result, VideoFrame};

mod config;
mod video;

pub use config::VideoEncoderConfig;
pub use video::{SEQUENCE_END_CODE, VideoEncoder};
