//! Codec failure types.

use thiserror::Error;

/// A block or compression round-trip that could not complete.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A structured value does not match the shape its schema rule declares
    /// (for example a scalar where the schema expects a list of records).
    #[error("field `{field}` does not match schema shape `{expected}`")]
    ShapeMismatch {
        field: String,
        expected: &'static str,
    },

    /// The compressed payload is not valid base64.
    #[error("compressed save is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The deflate stream is truncated or corrupt.
    #[error("compressed save is truncated or corrupt: {0}")]
    Deflate(#[from] std::io::Error),

    /// The decompressed bytes are not UTF-8 text.
    #[error("decompressed save is not valid UTF-8 text")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The decompressed text does not start with a recognized save sentinel.
    #[error("decompressed save carries no recognized sentinel wrapper")]
    UnrecognizedWrapper,
}
