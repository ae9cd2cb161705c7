use std::path::PathBuf;

use thiserror::Error;

/// Failure raised while reading, parsing, or writing the token file.
///
/// These never cross the [`crate::SessionManager`] boundary; the manager logs
/// them and degrades to an empty or unchanged store.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse token file {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize token document for {path}: {source}")]
    JsonSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("account entry '{identifier}' is not a JSON object")]
    NotAnObject { identifier: String },

    #[error("account entry '{identifier}' is missing required field '{field}'")]
    MissingField {
        identifier: String,
        field: &'static str,
    },

    #[error("account entry '{identifier}' has an empty '{field}' field")]
    EmptyField {
        identifier: String,
        field: &'static str,
    },

    #[error("account entry '{identifier}' has no profile entries")]
    MissingProfiles { identifier: String },
}

impl TokenStoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn json_serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonSerialize {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn missing_field(identifier: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            identifier: identifier.into(),
            field,
        }
    }

    #[must_use]
    pub fn empty_field(identifier: impl Into<String>, field: &'static str) -> Self {
        Self::EmptyField {
            identifier: identifier.into(),
            field,
        }
    }
}
