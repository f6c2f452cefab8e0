use thiserror::Error;

/// Errors raised by the content-line engine.
///
/// Malformed input lines are not errors; the reader reports them as
/// warnings and keeps going.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    #[error("Quoted-printable decoding failed for value: {value}")]
    Decoding { value: String },

    #[error("Invalid fold profile: {0}")]
    InvalidFoldProfile(String),

    #[error("Invalid line: {0}")]
    InvalidLine(String),

    #[error("Unknown version: {0}")]
    UnknownVersion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    CoreError(#[from] cardline_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
