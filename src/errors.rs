//! Error types for the edges of the dashboard: source tables, configuration
//! and caller-side validation.
//!
//! The filter/aggregate pipeline itself never fails. Empty selections, crew
//! decades with no match and groups with no rows are modelled as empty or
//! absent results, so nothing in `crate::pipeline` returns a `Result`.
//!
//! # Example
//!
//! ```rust
//! use cinemap::errors::Error;
//!
//! let err = Error::validation("select at least one genre");
//! assert!(err.is_user_fixable());
//! assert_eq!(err.to_string(), "Validation error: select at least one genre");
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for cinemap operations
#[derive(Debug, Error)]
pub enum Error {
    /// A source table could not be opened or read
    #[error("Source table unavailable: {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source table is not valid CSV (bad quoting, ragged rows)
    #[error("Malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-side validation errors (empty genre selection, inverted range)
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a source-unavailable error for a table path
    pub fn source_unavailable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a CSV error for a table path
    pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the user can fix this by changing arguments, config or data.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. }
                | Self::Csv { .. }
                | Self::Configuration(_)
                | Self::Validation(_)
                | Self::Toml(_)
        )
    }
}

/// Result type for cinemap operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_mentions_path() {
        let err = Error::source_unavailable(
            "data/movies.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(
            err.to_string(),
            "Source table unavailable: data/movies.csv"
        );
        assert!(err.is_user_fixable());
    }

    #[test]
    fn test_io_errors_are_not_user_fixable() {
        let err: Error = std::io::Error::other("disk on fire").into();
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_configuration_error_display() {
        let err = Error::configuration("ranking.top_k must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: ranking.top_k must be positive"
        );
    }
}
