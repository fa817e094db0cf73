//! Errors raised while reading `mvs.toml`.

use mvs_common::NumberFormatError;

/// Failure to load, parse, or validate a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML text is malformed or has the wrong shape.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is out of range.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// An `[inputs]` entry is not a valid number literal.
    #[error("invalid value for input '{name}': {source}")]
    InvalidInput {
        /// The input name.
        name: String,
        /// Why the literal was rejected.
        #[source]
        source: NumberFormatError,
    },
}
