use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Redaction lists
    //-------------------------------------------------------------------------
    #[error("'{option}' entry {index} must be a string, got {found}")]
    NonStringListEntry {
        option: &'static str,
        index: usize,
        found: String,
    },

    #[error("'{option}' entry {index} is empty")]
    EmptyListEntry { option: &'static str, index: usize },

    //-------------------------------------------------------------------------
    // Delivery
    //-------------------------------------------------------------------------
    #[error("invalid {option} '{value}': {source}")]
    InvalidUrl {
        option: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{option} '{value}' must use http or https")]
    UnsupportedScheme { option: &'static str, value: String },

    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
}

impl ConfigError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
