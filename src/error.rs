//! Error types for the undocs library.

use std::io;
use thiserror::Error;

/// Result type alias for undocs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing an exported document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input bytes are not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The HTML tokenizer failed irrecoverably.
    #[error("Tokenizer error: {0}")]
    Tokenize(String),

    /// An anchor href was present but did not have the expected
    /// redirect-wrapper structure (missing query string or missing the
    /// destination parameter).
    #[error("Malformed link: {0}")]
    MalformedLink(String),

    /// A close event arrived for a context that was never opened, or the
    /// input used a structure the state machine does not support. Either
    /// the input is malformed or the parser state is unsound.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),
}
