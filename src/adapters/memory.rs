// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory configuration source adapter.

use crate::domain::Result;
use crate::ports::ConfigSource;
use std::io::{BufRead, Cursor};

/// Configuration source holding its text in memory.
///
/// Useful for embedded defaults and for tests. Opening never fails.
///
/// # Examples
///
/// ```rust
/// use blockcfg::adapters::MemorySource;
/// use blockcfg::service::ConfigStore;
///
/// let store = ConfigStore::with_source(Box::new(MemorySource::new(
///     "defaults",
///     "[Server]\nport = 8080\n",
/// )));
/// assert_eq!(store.get_value::<u32>("Server", "port").unwrap(), 8080);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    identifier: String,
    content: String,
}

impl MemorySource {
    /// Creates a source named `identifier` serving `content`.
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }

}

impl ConfigSource for MemorySource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.content.as_bytes())))
    }
}
