/*!
    Frame scaling and pixel format conversion for the media crate family.

    This is the adapter layer between decoder output and encoder input:
    decoders emit frames in whatever format the source codec specifies;
    this crate converts them to the resolution and pixel format the next
    stage needs.

    # Example

    ```ignore
    use media_transform::{ScalerConfig, VideoScaler};

    // Convert any video frame to 640x480 YUV 4:2:0 for encoding
    let mut scaler = VideoScaler::new(ScalerConfig::to_yuv420p(640, 480));

    for frame in decoded_frames {
        let yuv = scaler.scale(&frame)?;
        // Encode yuv
    }
    ```

    # Lazy Initialization

    The scaler captures its source geometry from the first frame it sees
    and rebuilds the underlying context whenever the source resolution or
    pixel format changes. Scaling itself is stateless: each frame converts
    independently and the presentation timestamp passes through untouched.
*/

pub use media_types::{Error, PixelFormat, Result, VideoFrame};

mod video;

pub use video::{ScalerConfig, ScalingAlgorithm, VideoScaler};
