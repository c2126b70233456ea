use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by dump, load and fixture operations.
///
/// Nothing is caught or retried internally; every failure reaches the caller
/// as one of these variants.
#[derive(Debug, Error)]
pub enum SnapError {
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to encode {what}: {message}")]
    Encode { what: String, message: String },
    #[error("query rejected for table '{table}': {message}")]
    Query { table: String, message: String },
    #[error("record in '{table}' failed validation: {message}")]
    Validation { table: String, message: String },
    #[error("unknown subtype '{subtype}' for table '{table}' (known: {known})")]
    UnknownSubtype {
        table: String,
        subtype: String,
        known: String,
    },
    #[error("record in '{0}' has no identifier and cannot be keyed")]
    MissingIdentifier(String),
    #[error("path escapes the project root: {0}")]
    OutsideProjectRoot(PathBuf),
}

impl SnapError {
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SnapError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        SnapError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn query(table: impl Into<String>, message: impl ToString) -> Self {
        SnapError::Query {
            table: table.into(),
            message: message.to_string(),
        }
    }

    pub fn validation(table: impl Into<String>, message: impl ToString) -> Self {
        SnapError::Validation {
            table: table.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T, E = SnapError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_keeps_source() {
        let err = SnapError::filesystem(
            "db/widgets.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "filesystem error at db/widgets.json: missing");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            SnapError::query("widgets", "unknown column 'color'").to_string(),
            "query rejected for table 'widgets': unknown column 'color'"
        );
        assert_eq!(
            SnapError::validation("widgets", "name can't be null").to_string(),
            "record in 'widgets' failed validation: name can't be null"
        );
        assert_eq!(
            SnapError::MissingIdentifier("widgets".into()).to_string(),
            "record in 'widgets' has no identifier and cannot be keyed"
        );
    }
}
