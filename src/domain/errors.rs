// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! Two layers of error reporting live here:
//!
//! - [`ErrorKind`] is the small, `Copy` status recorded as the "last error" on a
//!   [`ConfigStore`](crate::service::ConfigStore).
//! - [`ConfigError`] is the detailed error carried by `Result`s. Every variant maps to
//!   exactly one [`ErrorKind`] through [`ConfigError::kind`].

use crate::domain::ConfigKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// The status recorded by load and lookup operations.
///
/// Exactly one kind is active as the last error of a store at any time. It is
/// overwritten, never accumulated, by each operation that can fail.
///
/// # Examples
///
/// ```
/// use blockcfg::domain::ErrorKind;
///
/// assert_eq!(ErrorKind::BlockNotFound.message(), "Block not found");
/// assert!(ErrorKind::None.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No error.
    #[default]
    None,
    /// The configuration source could not be opened.
    SourceNotFound,
    /// No source identifier was configured.
    SourceEmpty,
    /// Reading the source failed part way through.
    ReadFailure,
    /// A line could not be parsed.
    ParseFailure,
    /// The requested key does not exist in the block.
    KeyNotFound,
    /// The requested block does not exist.
    BlockNotFound,
    /// The stored value could not be converted to the requested type.
    ConversionFailure,
}

impl ErrorKind {
    /// Returns the human-readable message for this kind.
    pub const fn message(self) -> &'static str {
        match self {
            ErrorKind::None => "No error",
            ErrorKind::SourceNotFound => "Configuration file not found",
            ErrorKind::SourceEmpty => "Configuration file is empty",
            ErrorKind::ReadFailure => "Error reading configuration file",
            ErrorKind::ParseFailure => "Error parsing configuration file",
            ErrorKind::KeyNotFound => "Key not found",
            ErrorKind::BlockNotFound => "Block not found",
            ErrorKind::ConversionFailure => "Value conversion failed",
        }
    }

    /// Returns `true` if this is [`ErrorKind::None`].
    pub fn is_none(self) -> bool {
        self == ErrorKind::None
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The main error type for configuration operations.
///
/// # Examples
///
/// ```
/// use blockcfg::domain::{ConfigError, ErrorKind};
///
/// let error = ConfigError::BlockNotFound {
///     block: "Server".to_string(),
/// };
/// assert_eq!(error.kind(), ErrorKind::BlockNotFound);
/// assert_eq!(error.to_string(), "Block not found: Server");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No source identifier was configured before loading.
    #[error("No configuration source configured")]
    SourceEmpty,

    /// The configuration source could not be opened.
    #[error("Configuration source '{source_name}' could not be opened: {source}")]
    SourceNotFound {
        /// The identifier of the source
        source_name: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Reading from the source failed part way through.
    #[error("Failed to read configuration source '{source_name}' at line {line}: {source}")]
    ReadError {
        /// The identifier of the source
        source_name: String,
        /// The 1-based line number that could not be read
        line: usize,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A line is neither blank, a comment, a block header nor a `key = value` pair.
    #[error("Failed to parse configuration '{source_name}' at line {line}: {content:?}")]
    ParseError {
        /// The identifier of the source
        source_name: String,
        /// The 1-based line number of the offending line
        line: usize,
        /// The offending line, trimmed
        content: String,
    },

    /// The requested block does not exist.
    #[error("Block not found: {block}")]
    BlockNotFound {
        /// The block that was not found
        block: String,
    },

    /// The requested key does not exist in its block.
    #[error("Configuration key not found: {key}")]
    KeyNotFound {
        /// The key that was not found
        key: ConfigKey,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// Returns the [`ErrorKind`] this error is recorded as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::SourceEmpty => ErrorKind::SourceEmpty,
            ConfigError::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            ConfigError::ReadError { .. } => ErrorKind::ReadFailure,
            ConfigError::ParseError { .. } => ErrorKind::ParseFailure,
            ConfigError::BlockNotFound { .. } => ErrorKind::BlockNotFound,
            ConfigError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            ConfigError::TypeConversionError { .. } => ErrorKind::ConversionFailure,
        }
    }

    /// Returns `true` if the error is a missing block or a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::BlockNotFound { .. } | ConfigError::KeyNotFound { .. }
        )
    }

    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
