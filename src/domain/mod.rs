// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module holds the types shared by every other layer: keys, raw values and
//! their typed conversions, and the error taxonomy. It performs no I/O.

pub mod config_key;
pub mod config_value;
pub mod errors;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::{ConfigValue, FromConfigValue};
pub use errors::{ConfigError, ErrorKind, Result};

/// The loaded mapping: block name to (key name to raw value).
pub type BlockMap = std::collections::HashMap<String, std::collections::HashMap<String, String>>;
