// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns a text stream into the
//! two-level block mapping.

use crate::domain::{BlockMap, Result};
use std::io::{BufRead, Cursor};

/// A trait for parsing configuration streams.
///
/// Parsers write into a caller-owned [`BlockMap`] instead of returning a fresh one
/// so that entries parsed before a failure stay visible to the caller.
///
/// # Examples
///
/// ```rust
/// use blockcfg::ports::ConfigParser;
/// use blockcfg::domain::{BlockMap, Result};
/// use std::io::BufRead;
///
/// struct OneBlockParser;
///
/// impl ConfigParser for OneBlockParser {
///     fn parse_into(
///         &self,
///         _source_name: &str,
///         reader: &mut dyn BufRead,
///         blocks: &mut BlockMap,
///     ) -> Result<()> {
///         let block = blocks.entry("all".to_string()).or_default();
///         for (n, line) in reader.lines().enumerate() {
///             block.insert(n.to_string(), line.unwrap_or_default());
///         }
///         Ok(())
///     }
/// }
///
/// let blocks = OneBlockParser.parse("x\ny").unwrap();
/// assert_eq!(blocks["all"]["1"], "y");
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses `reader` into `blocks`.
    ///
    /// # Arguments
    ///
    /// * `source_name` - Identifier of the stream, used in error messages
    /// * `reader` - The stream to consume
    /// * `blocks` - The mapping to populate; entries are added or overwritten
    ///
    /// # Errors
    ///
    /// Returns the first read or parse error encountered. Entries stored before the
    /// error are left in `blocks`.
    fn parse_into(
        &self,
        source_name: &str,
        reader: &mut dyn BufRead,
        blocks: &mut BlockMap,
    ) -> Result<()>;

    /// Parses in-memory content into a new mapping.
    ///
    /// On failure the partial mapping is discarded; use [`parse_into`](Self::parse_into)
    /// to keep it.
    fn parse(&self, content: &str) -> Result<BlockMap> {
        let mut blocks = BlockMap::new();
        self.parse_into("<memory>", &mut Cursor::new(content), &mut blocks)?;
        Ok(blocks)
    }
}
