//! Error handling module for build-summary
//!
//! Loading the configuration is the only fatal step, so most variants describe
//! why the configuration document could not be turned into records.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for build-summary
#[derive(Error, Debug)]
pub enum ReportError {
    /// The configuration file is missing or unreadable
    #[error("Failed to read configuration from {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML (or JSON)
    #[error("Failed to parse configuration {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The configuration parsed, but the top level is not a list of records
    #[error("Configuration {} must be a sequence of records, found {found}", .path.display())]
    ConfigShape { path: PathBuf, found: String },

    /// Writing the report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for build-summary operations
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// True for every variant raised while loading the configuration.
    pub fn is_config_load(&self) -> bool {
        matches!(
            self,
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::ConfigShape { .. }
        )
    }

    /// Path of the configuration source, if the error concerns one
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ConfigRead { path, .. }
            | Self::ConfigParse { path, .. }
            | Self::ConfigShape { path, .. } => Some(path),
            Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = ReportError::ConfigRead {
            path: PathBuf::from("/tmp/build.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read configuration from /tmp/build.yaml: file not found"
        );

        let err = ReportError::ConfigShape {
            path: PathBuf::from("build.yaml"),
            found: "a mapping".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration build.yaml must be a sequence of records, found a mapping"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ReportError = io_err.into();
        assert!(matches!(err, ReportError::Io(_)));
        assert!(!err.is_config_load());
        assert!(err.path().is_none());
    }

    #[test]
    fn test_config_load_category() {
        let source = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        let err = ReportError::ConfigParse {
            path: PathBuf::from("bad.yaml"),
            source,
        };
        assert!(err.is_config_load());
        assert_eq!(err.path(), Some(std::path::Path::new("bad.yaml")));
    }
}
