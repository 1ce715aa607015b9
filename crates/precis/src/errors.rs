//! # Error Types

/// Errors from precis operations.
#[derive(Debug, thiserror::Error)]
pub enum PrecisError {
    /// A model name which is not in the model table.
    #[error("{name} is not supported model name.\n[Available model list]: {}", .available.join(", "))]
    UnsupportedModel {
        /// The requested model name.
        name: String,

        /// The names in the model table.
        available: Vec<String>,
    },

    /// A length keyword which is not a known preset.
    #[error("{length} unexpected input format of length.\nAvailable length format: {}", .available.join(", "))]
    UnsupportedLength {
        /// The requested length keyword.
        length: String,

        /// The known length keywords.
        available: Vec<String>,
    },

    /// Arguments which an algorithm cannot run on.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required file or resource could not be found.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// A model weights file in a format which cannot be loaded.
    #[error("unsupported checkpoint: {0}")]
    UnsupportedCheckpoint(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed data file content.
    #[error("parse error: {0}")]
    Parse(String),

    /// Error from an external component (model runtime, downloader, archive reader).
    #[error("{0}")]
    External(String),
}

impl PrecisError {
    /// Wrap any displayable external error.
    pub fn external<E: std::fmt::Display>(err: E) -> Self {
        PrecisError::External(err.to_string())
    }
}

/// Result type for precis operations.
pub type PrecisResult<T> = core::result::Result<T, PrecisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_model_message() {
        let err = PrecisError::UnsupportedModel {
            name: "gpt".to_string(),
            available: vec!["distilbart".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "gpt is not supported model name.\n[Available model list]: distilbart"
        );
    }

    #[test]
    fn test_unsupported_length_message() {
        let err = PrecisError::UnsupportedLength {
            length: "tiny".to_string(),
            available: vec!["short".into(), "medium".into(), "long".into()],
        };
        assert_eq!(
            err.to_string(),
            "tiny unexpected input format of length.\nAvailable length format: short, medium, long"
        );
    }
}
