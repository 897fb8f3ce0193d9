/*!
    Decoded frame type.
*/

use crate::{Error, PixelFormat, Pts, Rational, Result};

/**
    A decoded video frame.

    Pixel data is tightly packed: planes are concatenated in order with no
    row padding, each plane laid out per [`PixelFormat::planes`]. Ownership
    is exclusive to whichever pipeline stage currently holds the frame.
*/
#[derive(Clone, Debug)]
pub struct VideoFrame {
    /// Raw pixel data, planes concatenated.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format of the data.
    pub format: PixelFormat,
    /// Presentation timestamp (None for frames without timing).
    pub pts: Option<Pts>,
    /// Time base for interpreting the PTS.
    pub time_base: Rational,
}

impl VideoFrame {
    /**
        Create a new video frame from an existing packed buffer.
    */
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        pts: Option<Pts>,
        time_base: Rational,
    ) -> Self {
        Self {
            data,
            width,
            height,
            format,
            pts,
            time_base,
        }
    }

    /**
        Allocate a zero-filled frame of the given format and dimensions.

        For YUV formats a zero-filled buffer is green, not black; callers
        that care fill the planes themselves.
    */
    pub fn alloc(format: PixelFormat, width: u32, height: u32, time_base: Rational) -> Self {
        Self {
            data: vec![0u8; format.buffer_size(width, height)],
            width,
            height,
            format,
            pts: None,
            time_base,
        }
    }

    /**
        Returns the buffer size this frame's format and dimensions require.
    */
    pub fn expected_data_len(&self) -> usize {
        self.format.buffer_size(self.width, self.height)
    }

    /**
        Validate that the buffer matches the declared geometry.
    */
    pub fn check_layout(&self) -> Result<()> {
        let expected = self.expected_data_len();
        if self.data.len() != expected {
            return Err(Error::invalid_frame(format!(
                "{}x{} {:?} frame needs {expected} bytes, buffer has {}",
                self.width,
                self.height,
                self.format,
                self.data.len()
            )));
        }
        Ok(())
    }

    /**
        Returns the packed data of one plane.

        # Panics

        Panics if `index` is out of range for the format.
    */
    pub fn plane_data(&self, index: usize) -> &[u8] {
        let (offset, len) = self.plane_span(index);
        &self.data[offset..offset + len]
    }

    /**
        Returns the packed data of one plane, mutably.

        # Panics

        Panics if `index` is out of range for the format.
    */
    pub fn plane_data_mut(&mut self, index: usize) -> &mut [u8] {
        let (offset, len) = self.plane_span(index);
        &mut self.data[offset..offset + len]
    }

    fn plane_span(&self, index: usize) -> (usize, usize) {
        let planes = self.format.planes(self.width, self.height);
        assert!(
            index < planes.len(),
            "plane index {index} out of range for {:?}",
            self.format
        );
        let offset = planes[..index].iter().map(|p| p.size()).sum();
        (offset, planes[index].size())
    }

    /**
        Returns the presentation time as a Duration, if PTS is set.
    */
    pub fn presentation_time(&self) -> Option<std::time::Duration> {
        self.pts.map(|pts| pts.to_duration(self.time_base))
    }
}

// Ensure frames are Send + Sync
static_assertions::assert_impl_all!(VideoFrame: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const TB_1_25: Rational = Rational { num: 1, den: 25 };

    #[test]
    fn frame_construction() {
        let frame = VideoFrame::new(
            vec![0u8; 100 * 100 * 3],
            100,
            100,
            PixelFormat::Rgb24,
            Some(Pts(10)),
            TB_1_25,
        );

        assert_eq!(frame.width, 100);
        assert_eq!(frame.height, 100);
        assert_eq!(frame.format, PixelFormat::Rgb24);
        assert_eq!(frame.data.len(), 100 * 100 * 3);
        assert!(frame.check_layout().is_ok());
    }

    #[test]
    fn alloc_matches_layout() {
        let frame = VideoFrame::alloc(PixelFormat::Yuv420p, 640, 480, TB_1_25);
        assert_eq!(frame.data.len(), 640 * 480 * 3 / 2);
        assert!(frame.check_layout().is_ok());
        assert_eq!(frame.pts, None);
    }

    #[test]
    fn check_layout_rejects_short_buffer() {
        let frame = VideoFrame::new(
            vec![0u8; 10],
            100,
            100,
            PixelFormat::Rgb24,
            None,
            TB_1_25,
        );
        assert!(matches!(
            frame.check_layout(),
            Err(Error::InvalidFrame { .. })
        ));
    }

    #[test]
    fn plane_access() {
        let mut frame = VideoFrame::alloc(PixelFormat::Yuv420p, 4, 4, TB_1_25);
        assert_eq!(frame.plane_data(0).len(), 16);
        assert_eq!(frame.plane_data(1).len(), 4);
        assert_eq!(frame.plane_data(2).len(), 4);

        frame.plane_data_mut(1).fill(128);
        assert_eq!(frame.data[16], 128);
        assert_eq!(frame.data[19], 128);
        assert_eq!(frame.data[15], 0);
        assert_eq!(frame.data[20], 0);
    }

    #[test]
    #[should_panic(expected = "plane index 1 out of range")]
    fn plane_out_of_range_panics() {
        let frame = VideoFrame::alloc(PixelFormat::Rgb24, 4, 4, TB_1_25);
        frame.plane_data(1);
    }

    #[test]
    fn presentation_time() {
        let frame = VideoFrame::new(vec![], 100, 100, PixelFormat::Rgb24, Some(Pts(50)), TB_1_25);
        assert_eq!(frame.presentation_time(), Some(Duration::from_secs(2)));

        let frame = VideoFrame::new(vec![], 100, 100, PixelFormat::Rgb24, None, TB_1_25);
        assert_eq!(frame.presentation_time(), None);
    }
}
