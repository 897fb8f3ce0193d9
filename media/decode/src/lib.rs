/*!
    Media decoding for the media crate family.

    This crate is the input side of the pipeline: it opens a media or image
    file, locates its video stream, and exposes a pull-one-frame operation.
    Demuxing and codec work happen inside FFmpeg; this crate owns the
    handles and routes packets.

    # Example

    ```ignore
    use media_decode::VideoDecoder;

    let mut decoder = VideoDecoder::open("video.mp4")?;
    println!("{}x{} {:?}", decoder.width(), decoder.height(), decoder.pixel_format());

    while let Some(frame) = decoder.next_frame()? {
        // Process frame
    }
    // Every call from here on returns Ok(None).
    ```

    # Session lifecycle

    `open` either locates a decodable video stream or fails; there is no
    half-open session. Once the container is exhausted, the decoder is
    drained of delayed frames and `next_frame` settles on `Ok(None)`.
    A decode failure on a routed packet is fatal to the session.
*/

pub use media_types::{Error, PixelFormat, Pts, Rational, Result, VideoFrame};

mod video;

pub use video::VideoDecoder;
