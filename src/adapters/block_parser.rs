// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parser for block-structured configuration files.
//!
//! The format is line oriented:
//!
//! ```text
//! # comment
//! [General]
//! version = 1.0.0
//! timeout = 30.5
//! ```

use crate::domain::{BlockMap, ConfigError, Result};
use crate::ports::ConfigParser;
use std::io::BufRead;

/// Characters stripped from both ends of lines, keys and values.
const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// What the scanner carries from one line to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    NoBlockOpen,
    BlockOpen(String),
}

/// A single classified line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Entry { key: &'a str, value: &'a str },
}

impl<'a> Line<'a> {
    /// Classifies an already trimmed line. Returns `None` for a malformed line.
    fn classify(line: &'a str) -> Option<Self> {
        if line.is_empty() {
            Some(Line::Blank)
        } else if line.starts_with('[') && line.ends_with(']') {
            Some(Line::Header(&line[1..line.len() - 1]))
        } else if line.starts_with('#') {
            Some(Line::Comment)
        } else {
            let (key, value) = line.split_once('=')?;
            Some(Line::Entry {
                key: key.trim_matches(WHITESPACE),
                value: value.trim_matches(WHITESPACE),
            })
        }
    }
}

/// Parser for `[block]` / `key = value` files.
///
/// Parsing is strict: the first line that is not blank, a comment, a header or a
/// `key = value` pair stops the parse with [`ConfigError::ParseError`]. Entries
/// before a `[block]` header, or after an empty `[]` header, are dropped.
///
/// # Examples
///
/// ```rust
/// use blockcfg::adapters::BlockParser;
/// use blockcfg::ports::ConfigParser;
///
/// let parser = BlockParser::new();
/// let blocks = parser.parse("[Server]\nuseSSL = true\n").unwrap();
/// assert_eq!(blocks["Server"]["useSSL"], "true");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockParser;

impl BlockParser {
    /// Creates a new block parser.
    pub fn new() -> Self {
        BlockParser
    }
}

impl ConfigParser for BlockParser {
    fn parse_into(
        &self,
        source_name: &str,
        reader: &mut dyn BufRead,
        blocks: &mut BlockMap,
    ) -> Result<()> {
        let mut state = ScanState::NoBlockOpen;

        for (idx, raw) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let raw = raw.map_err(|e| ConfigError::ReadError {
                source_name: source_name.to_string(),
                line: line_no,
                source: e,
            })?;
            let trimmed = raw.trim_matches(WHITESPACE);

            let line = Line::classify(trimmed).ok_or_else(|| ConfigError::ParseError {
                source_name: source_name.to_string(),
                line: line_no,
                content: trimmed.to_string(),
            })?;

            match line {
                Line::Blank | Line::Comment => {}
                Line::Header("") => {
                    tracing::debug!("Empty block header at {}:{}", source_name, line_no);
                    state = ScanState::NoBlockOpen;
                }
                Line::Header(name) => {
                    tracing::debug!("Opening block [{}] at {}:{}", name, source_name, line_no);
                    state = ScanState::BlockOpen(name.to_string());
                }
                Line::Entry { key, value } => match &state {
                    ScanState::BlockOpen(block) => {
                        tracing::trace!("{}.{} = {}", block, key, value);
                        blocks
                            .entry(block.clone())
                            .or_default()
                            .insert(key.to_string(), value.to_string());
                    }
                    ScanState::NoBlockOpen => {
                        tracing::debug!(
                            "Discarding key '{}' outside of any block at {}:{}",
                            key,
                            source_name,
                            line_no
                        );
                    }
                },
            }
        }

        Ok(())
    }
}
