/*!
    Codec identification.
*/

/**
    Video codec identifiers.

    This is the subset of codecs the encode session can target. MPEG-1 is
    the default output codec of every driver; the rest of the MPEG/H.26x
    family is here because the same elementary-stream pipeline applies.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// MPEG-1 Video
    Mpeg1Video,
    /// MPEG-2 Video
    Mpeg2Video,
    /// MPEG-4 Part 2
    Mpeg4,
    /// H.264 / AVC
    H264,
    /// H.265 / HEVC
    H265,
}

impl CodecId {
    /**
        Returns the short name of this codec.
    */
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mpeg1Video => "mpeg1video",
            Self::Mpeg2Video => "mpeg2video",
            Self::Mpeg4 => "mpeg4",
            Self::H264 => "h264",
            Self::H265 => "hevc",
        }
    }

    /**
        Returns true if this codec emits an MPEG-1/2 style elementary
        stream terminated by a sequence-end code.
    */
    pub const fn uses_sequence_end_code(self) -> bool {
        matches!(self, Self::Mpeg1Video | Self::Mpeg2Video)
    }
}
