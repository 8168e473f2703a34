//! Error types for MHT extraction

use thiserror::Error;

/// Errors that can occur while pulling the HTML document out of an MHT container
#[derive(Error, Debug)]
pub enum FormatError {
    /// The byte stream is not a parseable MIME message
    #[error("Malformed MIME structure: {0}")]
    Mime(String),

    /// The message has no `text/html` part
    #[error("No HTML part found in MHT document")]
    NoHtmlPart,

    /// The HTML part's body could not be decoded
    #[error("Failed to decode HTML part: {0}")]
    Decode(String),
}

/// Result type for MHT conversion operations
pub type Result<T> = std::result::Result<T, FormatError>;
