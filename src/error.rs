use thiserror::Error;

/// Result alias used throughout the counting core
pub type QuestResult<T> = Result<T, QuestError>;

/// Errors raised while counting reads and mapping them to a library.
///
/// All kinds are fatal to the current run; callers are expected to log the
/// message and exit non-zero.
#[derive(Debug, Error)]
pub enum QuestError {
    #[error("Invalid read: {0}")]
    InvalidRead(String),

    #[error("Invalid library: {0}")]
    InvalidLibrary(String),

    #[error("Missing metadata: {0}")]
    MissingMetadata(String),

    #[error("Unsupported data: {0}")]
    UnsupportedData(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid input format: {0}")]
    InvalidInputFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuestError {
    /// Stable label for the error kind, suitable for logs and exit reports
    pub fn kind(&self) -> &'static str {
        match self {
            QuestError::InvalidRead(_) => "invalid_read",
            QuestError::InvalidLibrary(_) => "invalid_library",
            QuestError::MissingMetadata(_) => "missing_metadata",
            QuestError::UnsupportedData(_) => "unsupported_data",
            QuestError::EmptyInput(_) => "empty_input",
            QuestError::InvalidInputFormat(_) => "invalid_input_format",
            QuestError::Io(_) => "io",
        }
    }
}

impl From<niffler::Error> for QuestError {
    fn from(err: niffler::Error) -> Self {
        match err {
            niffler::Error::IOError(e) => QuestError::Io(e),
            other => QuestError::InvalidInputFormat(other.to_string()),
        }
    }
}

impl From<rust_htslib::errors::Error> for QuestError {
    fn from(err: rust_htslib::errors::Error) -> Self {
        QuestError::InvalidInputFormat(format!("HTS file error: {}", err))
    }
}
