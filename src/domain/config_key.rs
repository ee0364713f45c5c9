// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key type addressing a single entry.
//!
//! A key in this crate is always scoped to a block, so `ConfigKey` pairs the block
//! name with the key name inside it.

use std::fmt;

/// A block-scoped configuration key.
///
/// Displayed as `block.name`. Neither part is validated: any string that can
/// appear between brackets or before `=` in a configuration file is accepted,
/// including the empty string.
///
/// # Examples
///
/// ```
/// use blockcfg::domain::ConfigKey;
///
/// let key = ConfigKey::new("Server", "useSSL");
/// assert_eq!(key.block(), "Server");
/// assert_eq!(key.name(), "useSSL");
/// assert_eq!(key.to_string(), "Server.useSSL");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    block: String,
    name: String,
}

impl ConfigKey {
    /// Creates a new key from a block name and a key name.
    pub fn new(block: impl Into<String>, name: impl Into<String>) -> Self {
        ConfigKey {
            block: block.into(),
            name: name.into(),
        }
    }

    /// Returns the block part of the key.
    pub fn block(&self) -> &str {
        &self.block
    }

    /// Returns the key name inside the block.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Splits the key into its block and name.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockcfg::domain::ConfigKey;
    ///
    /// let (block, name) = ConfigKey::new("Logging", "level").into_parts();
    /// assert_eq!(block, "Logging");
    /// assert_eq!(name, "level");
    /// ```
    pub fn into_parts(self) -> (String, String) {
        (self.block, self.name)
    }
}

impl<B: Into<String>, N: Into<String>> From<(B, N)> for ConfigKey {
    fn from((block, name): (B, N)) -> Self {
        ConfigKey::new(block, name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.block, self.name)
    }
}
