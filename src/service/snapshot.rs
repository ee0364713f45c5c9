// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable, shareable copies of a loaded configuration.

use crate::domain::{BlockMap, ConfigError, ConfigKey, ConfigValue, FromConfigValue, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A read-only copy of a [`ConfigStore`](crate::service::ConfigStore).
///
/// Snapshots are `Send + Sync` and can be wrapped in an `Arc` and read from many
/// threads. They have no last-error state: every lookup reports its outcome in its
/// own `Result`.
///
/// # Examples
///
/// ```rust
/// use blockcfg::adapters::MemorySource;
/// use blockcfg::service::ConfigStore;
/// use std::sync::Arc;
/// use std::thread;
///
/// let store = ConfigStore::with_source(Box::new(MemorySource::new(
///     "app.cfg",
///     "[Workers]\ncount = 4\n",
/// )));
/// let snapshot = Arc::new(store.snapshot());
///
/// let shared = Arc::clone(&snapshot);
/// let count = thread::spawn(move || shared.get_value::<u32>("Workers", "count").unwrap())
///     .join()
///     .unwrap();
/// assert_eq!(count, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    source: Option<String>,
    blocks: BTreeMap<String, BTreeMap<String, String>>,
}

impl Snapshot {
    pub(crate) fn new(source: Option<String>, blocks: &BlockMap) -> Self {
        let blocks = blocks
            .iter()
            .map(|(name, entries)| {
                let entries = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                (name.clone(), entries)
            })
            .collect();
        Self { source, blocks }
    }

    /// Returns the identifier of the source the snapshot was taken from.
    pub fn source_identifier(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Retrieves the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlockNotFound`] or [`ConfigError::KeyNotFound`].
    pub fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        let entries = self
            .blocks
            .get(key.block())
            .ok_or_else(|| ConfigError::BlockNotFound {
                block: key.block().to_string(),
            })?;
        entries
            .get(key.name())
            .map(|v| ConfigValue::from(v.as_str()))
            .ok_or_else(|| ConfigError::KeyNotFound { key: key.clone() })
    }

    /// Retrieves and converts the value of `key` in `block`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlockNotFound`], [`ConfigError::KeyNotFound`] or
    /// [`ConfigError::TypeConversionError`].
    pub fn get_value<T: FromConfigValue>(&self, block: &str, key: &str) -> Result<T> {
        let key = ConfigKey::new(block, key);
        let value = self.get(&key)?;
        T::from_config_value(&value, &key.to_string())
    }

    /// Returns the block names, sorted.
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    /// Returns the `(key, value)` pairs of `block`, sorted by key.
    pub fn entries(&self, block: &str) -> impl Iterator<Item = (&str, &str)> {
        self.blocks
            .get(block)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the snapshot holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
