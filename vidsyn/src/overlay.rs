/*!
    Fixed-position image overlay.
*/

use media_types::{Error, PixelFormat, Result, VideoFrame};

/**
    Copy `image` into the top-left corner of `frame`.

    Both frames must be packed RGB24. Pixels outside the image rectangle
    are left untouched; an image larger than the frame is clipped.
*/
pub fn blit_top_left(frame: &mut VideoFrame, image: &VideoFrame) -> Result<()> {
    if frame.format != PixelFormat::Rgb24 || image.format != PixelFormat::Rgb24 {
        return Err(Error::invalid_frame(format!(
            "overlay needs RGB24 frames, got {:?} onto {:?}",
            image.format, frame.format
        )));
    }
    frame.check_layout()?;
    image.check_layout()?;

    let rows = image.height.min(frame.height) as usize;
    let row_bytes = (image.width.min(frame.width) as usize) * 3;
    let src_stride = image.width as usize * 3;
    let dst_stride = frame.width as usize * 3;

    let src = image.plane_data(0);
    let dst = frame.plane_data_mut(0);
    for y in 0..rows {
        dst[y * dst_stride..y * dst_stride + row_bytes]
            .copy_from_slice(&src[y * src_stride..y * src_stride + row_bytes]);
    }
    Ok(())
}
