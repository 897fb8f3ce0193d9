/*!
    Error types for the media crate family.
*/

use std::fmt;

/**
    Error type for the media crate family.

    One variant per failure class the pipeline can hit, from container
    open through encoder finalization.
*/
#[derive(Debug)]
pub enum Error {
    /// I/O error (output file creation, write failure, etc.)
    Io(std::io::Error),
    /// Container or codec could not be opened
    Open { message: String },
    /// No video stream in the container
    StreamNotFound,
    /// No decoder/encoder registered for the codec
    UnsupportedCodec { message: String },
    /// Pixel format outside the supported vocabulary
    UnsupportedFormat { message: String },
    /// Mid-stream decode failure (fatal to the session)
    DecodeFailure { message: String },
    /// Mid-stream encode failure (fatal to the session)
    EncodeFailure { message: String },
    /// Frame geometry or buffer size does not match its declared format
    InvalidFrame { message: String },
    /// Session was used after finalization
    Finished,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Open { message } => write!(f, "open failed: {message}"),
            Self::StreamNotFound => write!(f, "no video stream found"),
            Self::UnsupportedCodec { message } => write!(f, "unsupported codec: {message}"),
            Self::UnsupportedFormat { message } => write!(f, "unsupported format: {message}"),
            Self::DecodeFailure { message } => write!(f, "decode failed: {message}"),
            Self::EncodeFailure { message } => write!(f, "encode failed: {message}"),
            Self::InvalidFrame { message } => write!(f, "invalid frame: {message}"),
            Self::Finished => write!(f, "session already finished"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Error {
    /**
        Create an open error with the given message.
    */
    pub fn open(message: impl Into<String>) -> Self {
        Self::Open {
            message: message.into(),
        }
    }

    /**
        Create an unsupported codec error with the given message.
    */
    pub fn unsupported_codec(message: impl Into<String>) -> Self {
        Self::UnsupportedCodec {
            message: message.into(),
        }
    }

    /**
        Create an unsupported format error with the given message.
    */
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /**
        Create a decode failure with the given message.
    */
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            message: message.into(),
        }
    }

    /**
        Create an encode failure with the given message.
    */
    pub fn encode(message: impl Into<String>) -> Self {
        Self::EncodeFailure {
            message: message.into(),
        }
    }

    /**
        Create an invalid frame error with the given message.
    */
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }

    /**
        Returns true if this error means a session was used after finalization.
    */
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

/**
    Result type alias for the media crate family.
*/
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn error_display() {
        let e = Error::open("bad container");
        assert_eq!(format!("{e}"), "open failed: bad container");

        let e = Error::unsupported_codec("no decoder for stream");
        assert_eq!(format!("{e}"), "unsupported codec: no decoder for stream");

        let e = Error::decode("truncated packet");
        assert_eq!(format!("{e}"), "decode failed: truncated packet");

        let e = Error::encode("frame rejected");
        assert_eq!(format!("{e}"), "encode failed: frame rejected");

        let e = Error::StreamNotFound;
        assert_eq!(format!("{e}"), "no video stream found");

        let e = Error::Finished;
        assert_eq!(format!("{e}"), "session already finished");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(format!("{e}").contains("file not found"));
    }

    #[test]
    fn error_is_finished() {
        assert!(Error::Finished.is_finished());
        assert!(!Error::decode("test").is_finished());
    }

    #[test]
    fn error_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let e = Error::Io(io_err);
        assert!(StdError::source(&e).is_some());

        let e = Error::StreamNotFound;
        assert!(StdError::source(&e).is_none());
    }
}
