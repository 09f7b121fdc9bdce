use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Why a source could not be turned into a document array.
///
/// Variants hold rendered messages rather than the underlying errors so results can
/// be cloned, compared and handed across task boundaries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    #[error("{0}")]
    Parse(String),

    #[error("CZML data must be an array")]
    NotAnArray,

    #[error("Failed to read file as text")]
    NotText,

    #[error("Error reading file: {0}")]
    FileRead(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unknown example: {0}")]
    UnknownExample(String),

    #[error("All sources failed: {}", join_failures(.0))]
    AllSourcesFailed(Vec<SourceFailure>),

    #[error("Load task failed: {0}")]
    Task(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// One source that failed during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub error: LoadError,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.error)
    }
}

fn join_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
