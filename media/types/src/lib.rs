/*!
    Shared types for the media crate family.

    This crate defines the vocabulary of the family — the types that cross crate
    boundaries. It has no dependency on FFmpeg, making it lightweight and enabling
    consumers to depend on it without pulling in FFmpeg bindings.

    # Core Types

    - [`Rational`] - Rational numbers for time bases and frame rates
    - [`Pts`] - Presentation timestamps in time_base units
    - [`VideoFrame`] - Decoded frame data as tightly packed planes

    # Format Types

    - [`PixelFormat`] - Video pixel formats, with per-plane layout math
    - [`Plane`] - Row geometry of one plane at a given resolution
    - [`CodecId`] - Video codec identifiers

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
*/

mod codec;
mod error;
mod format;
mod frame;
mod rational;
mod timestamp;

pub use codec::CodecId;
pub use error::{Error, Result};
pub use format::{PixelFormat, Plane};
pub use frame::VideoFrame;
pub use rational::Rational;
pub use timestamp::Pts;
