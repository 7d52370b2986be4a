//! Error types for the sectionize library.

use std::io;
use thiserror::Error;

/// Result type alias for sectionize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while segmenting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header carries a version we do not recognize.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Line extraction produced nothing to analyze: an image-only document,
    /// or every span fell below the minimum font size.
    #[error("No extractable text: document contains no lines after filtering")]
    NoExtractableText,

    /// A heading vocabulary pattern failed to compile.
    #[error("Invalid heading pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Segmentation options are out of range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Error while rendering chunks (JSON, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
