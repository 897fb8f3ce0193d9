/*!
    Synthetic test pattern frames.
*/

use media_types::{PixelFormat, Rational, VideoFrame};

/**
    Generate one frame of the moving gradient test pattern.

    Luma is `x + y + 3·i`, chroma is `128 + y + 2·i` and `64 + x + 5·i`,
    all wrapping: a diagonal ramp that drifts as `index` advances, so
    consecutive frames differ and the encoder has motion to chew on.
*/
pub fn gradient_frame(width: u32, height: u32, index: u32, time_base: Rational) -> VideoFrame {
    let mut frame = VideoFrame::alloc(PixelFormat::Yuv420p, width, height, time_base);
    let planes = frame.format.planes(width, height);

    let luma = frame.plane_data_mut(0);
    let row_bytes = planes[0].row_bytes;
    for y in 0..planes[0].rows {
        for x in 0..row_bytes {
            luma[y * row_bytes + x] = (x as u32 + y as u32 + index * 3) as u8;
        }
    }

    let cb_geometry = planes[1];
    let cb = frame.plane_data_mut(1);
    for y in 0..cb_geometry.rows {
        for x in 0..cb_geometry.row_bytes {
            cb[y * cb_geometry.row_bytes + x] = (128 + y as u32 + index * 2) as u8;
        }
    }

    let cr_geometry = planes[2];
    let cr = frame.plane_data_mut(2);
    for y in 0..cr_geometry.rows {
        for x in 0..cr_geometry.row_bytes {
            cr[y * cr_geometry.row_bytes + x] = (64 + x as u32 + index * 5) as u8;
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    const TB_1_25: Rational = Rational { num: 1, den: 25 };

    #[test]
    fn frame_geometry() {
        let frame = gradient_frame(640, 480, 0, TB_1_25);
        assert_eq!(frame.width, 640);
        assert_eq!(frame.height, 480);
        assert_eq!(frame.format, PixelFormat::Yuv420p);
        assert!(frame.check_layout().is_ok());
    }

    #[test]
    fn pattern_values() {
        let frame = gradient_frame(16, 16, 0, TB_1_25);
        let luma = frame.plane_data(0);
        assert_eq!(luma[0], 0); // x=0, y=0
        assert_eq!(luma[3], 3); // x=3, y=0
        assert_eq!(luma[16 + 2], 3); // x=2, y=1

        let cb = frame.plane_data(1);
        assert_eq!(cb[0], 128);
        let cr = frame.plane_data(2);
        assert_eq!(cr[1], 65);
    }

    #[test]
    fn pattern_drifts_with_index() {
        let a = gradient_frame(16, 16, 0, TB_1_25);
        let b = gradient_frame(16, 16, 1, TB_1_25);
        assert_ne!(a.plane_data(0), b.plane_data(0));
        assert_eq!(b.plane_data(0)[0], 3); // index shifts luma by 3
    }

    #[test]
    fn values_wrap() {
        let frame = gradient_frame(16, 16, 100, TB_1_25);
        assert_eq!(frame.plane_data(0)[0], (300 % 256) as u8);
    }
}
