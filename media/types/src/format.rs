/*!
    Pixel format types and plane layout math.
*/

/**
    Video pixel formats.

    This is the subset of formats this pipeline meets in practice. Decoded
    stills commonly arrive as packed RGB or full-range (JPEG) planar YUV;
    encoders take limited-range planar YUV 4:2:0.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Planar YUV 4:2:0, full range (JPEG sources)
    Yuvj420p,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:2:2, full range (JPEG sources)
    Yuvj422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:4:4, full range (JPEG sources)
    Yuvj444p,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Single-plane 8-bit luma
    Gray8,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Packed BGRA, 32bpp
    Bgra,
}

/**
    Row geometry of one plane at a given resolution.

    `row_bytes` is the number of meaningful bytes per row (no padding);
    `rows` is the number of rows in the plane.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plane {
    pub row_bytes: usize,
    pub rows: usize,
}

impl Plane {
    /**
        Returns the packed byte size of this plane.
    */
    pub const fn size(self) -> usize {
        self.row_bytes * self.rows
    }
}

/// Per-plane descriptor: chroma shifts plus bytes per horizontal sample.
#[derive(Clone, Copy)]
struct PlaneSpec {
    w_shift: u32,
    h_shift: u32,
    sample_bytes: usize,
}

const fn spec(w_shift: u32, h_shift: u32, sample_bytes: usize) -> PlaneSpec {
    PlaneSpec {
        w_shift,
        h_shift,
        sample_bytes,
    }
}

const PLANAR_420: &[PlaneSpec] = &[spec(0, 0, 1), spec(1, 1, 1), spec(1, 1, 1)];
const PLANAR_422: &[PlaneSpec] = &[spec(0, 0, 1), spec(1, 0, 1), spec(1, 0, 1)];
const PLANAR_444: &[PlaneSpec] = &[spec(0, 0, 1), spec(0, 0, 1), spec(0, 0, 1)];
// Interleaved chroma: half-width sample pairs, two bytes each.
const SEMI_PLANAR_420: &[PlaneSpec] = &[spec(0, 0, 1), spec(1, 1, 2)];
const SINGLE_8: &[PlaneSpec] = &[spec(0, 0, 1)];
const PACKED_24: &[PlaneSpec] = &[spec(0, 0, 3)];
const PACKED_32: &[PlaneSpec] = &[spec(0, 0, 4)];

impl PixelFormat {
    const fn plane_specs(self) -> &'static [PlaneSpec] {
        match self {
            Self::Yuv420p | Self::Yuvj420p => PLANAR_420,
            Self::Yuv422p | Self::Yuvj422p => PLANAR_422,
            Self::Yuv444p | Self::Yuvj444p => PLANAR_444,
            Self::Nv12 => SEMI_PLANAR_420,
            Self::Gray8 => SINGLE_8,
            Self::Rgb24 | Self::Bgr24 => PACKED_24,
            Self::Rgba | Self::Bgra => PACKED_32,
        }
    }

    /**
        Returns the number of planes in this format.
    */
    pub const fn plane_count(self) -> usize {
        self.plane_specs().len()
    }

    /**
        Returns true if this is a planar or semi-planar format.
    */
    pub const fn is_planar(self) -> bool {
        self.plane_count() > 1
    }

    /**
        Returns true if this is a full-range JPEG variant.
    */
    pub const fn is_full_range(self) -> bool {
        matches!(self, Self::Yuvj420p | Self::Yuvj422p | Self::Yuvj444p)
    }

    /**
        Returns the plane geometry for a frame of the given dimensions.

        Odd dimensions round chroma planes up, matching how the codec
        library sizes subsampled planes.
    */
    pub fn planes(self, width: u32, height: u32) -> Vec<Plane> {
        self.plane_specs()
            .iter()
            .map(|s| Plane {
                row_bytes: ceil_shift(width, s.w_shift) as usize * s.sample_bytes,
                rows: ceil_shift(height, s.h_shift) as usize,
            })
            .collect()
    }

    /**
        Returns the total packed buffer size for a frame of the given
        dimensions.
    */
    pub fn buffer_size(self, width: u32, height: u32) -> usize {
        self.planes(width, height).iter().map(|p| p.size()).sum()
    }
}

#[inline]
const fn ceil_shift(value: u32, shift: u32) -> u32 {
    (value + (1 << shift) - 1) >> shift
}
