//! Configuration error types

use thiserror::Error;

use crate::errors::ParseError;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source/sink descriptor that does not parse
    #[error("Invalid descriptor for '{field}': {source}")]
    InvalidDescriptor {
        field: String,
        #[source]
        source: ParseError,
    },

    #[error("Field '{field}' must not be empty")]
    EmptyField { field: String },

    /// Driver class name taken by the synthetic endpoint class
    #[error("Driver class '{name}' is reserved. {hint}")]
    ReservedName { name: String, hint: String },

    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
