/// Structured error types for wms-core.
///
/// Uses `thiserror` so library consumers get composable errors;
/// the `wms` binary wraps these with `anyhow` context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wms-core operations
#[derive(Error, Debug)]
pub enum WmsError {
    /// I/O operation failed
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    /// Config file is not valid TOML or is missing fields
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Required environment variable is not set
    #[error("unable to read environment variable: {name}")]
    MissingEnv { name: &'static str },

    /// Environment variable is set but cannot be parsed
    #[error("invalid value '{value}' for environment variable {name}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Result type alias for wms-core operations
pub type Result<T> = std::result::Result<T, WmsError>;

impl WmsError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WmsError::MissingEnv { name: "DB_HOST" };
        assert_eq!(
            err.to_string(),
            "unable to read environment variable: DB_HOST"
        );

        let err = WmsError::io(
            "/tmp/wms.toml",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("/tmp/wms.toml"));
    }
}
