//! Error types for dataset and glossary loading.

use thiserror::Error;

pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Failures surfaced as a status message. None of them are fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The document has no header row.
    #[error("CSV appears empty or unreadable.")]
    EmptyInput,

    /// No file was chosen before asking to load.
    #[error("Please select a CSV file first.")]
    NoFileSelected,

    /// A local file could not be read.
    #[error("Failed to read CSV: {0}")]
    Read(String),

    /// The request itself failed.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The operation is unavailable on this target.
    #[error("{0} is only available in the browser")]
    Unsupported(&'static str),

    /// A glossary document could not be decoded.
    #[error("Glossary could not be parsed: {0}")]
    Glossary(String),
}
