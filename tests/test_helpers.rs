// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities and mock implementations for testing.
//!
//! This module provides helper functions and mock sources that can be used across
//! different test files.

#![allow(dead_code)]

use blockcfg::domain::{ConfigError, Result};
use blockcfg::ports::ConfigSource;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};

/// The configuration used throughout the integration tests.
pub const SAMPLE_CONFIG: &str = "\
[General]
version = 1.0.0
timeout = 30.5
[Server]
useSSL = true
[Logging]
maxFileSize = 10485760
";

/// A reader that fails every read.
struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "simulated device failure"))
    }
}

/// A mock configuration source for testing.
///
/// Serves its content, optionally fails to open, and optionally fails once the
/// content has been read. Counts how often it was opened.
#[derive(Debug, Default)]
pub struct MockSource {
    identifier: String,
    content: String,
    fail_open: bool,
    fail_after_content: bool,
    opens: AtomicUsize,
}

impl MockSource {
    /// Creates a new mock source with the given identifier and content.
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Sets whether opening should fail.
    pub fn with_failing_open(mut self, should_fail: bool) -> Self {
        self.fail_open = should_fail;
        self
    }

    /// Sets whether reading should fail after the content has been served.
    pub fn with_failing_read(mut self, should_fail: bool) -> Self {
        self.fail_after_content = should_fail;
        self
    }

    /// Returns how many times the source has been opened.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl ConfigSource for MockSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(ConfigError::SourceNotFound {
                source_name: self.identifier.clone(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "mock open failure"),
            });
        }

        let content = Cursor::new(self.content.as_bytes());
        if self.fail_after_content {
            Ok(Box::new(BufReader::new(content.chain(FailingReader))))
        } else {
            Ok(Box::new(content))
        }
    }
}

/// Creates a temporary configuration file with the given content.
///
/// Returns a NamedTempFile that will be automatically deleted when dropped.
pub fn create_temp_config(content: impl AsRef<[u8]>) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_ref()).unwrap();
    file.flush().unwrap();
    file
}

/// Creates a mock source serving [`SAMPLE_CONFIG`].
pub fn create_test_source() -> MockSource {
    MockSource::new("sample.cfg", SAMPLE_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(source: &MockSource) -> io::Result<Vec<String>> {
        source.open().unwrap().lines().collect()
    }

    #[test]
    fn test_mock_source_basic() {
        let source = MockSource::new("test", "[A]\nk = v\n");
        assert_eq!(source.identifier(), "test");
        assert_eq!(read_all(&source).unwrap(), vec!["[A]", "k = v"]);
        assert_eq!(source.open_count(), 1);
    }

    #[test]
    fn test_mock_source_open_failure() {
        let source = MockSource::new("test", "").with_failing_open(true);
        assert!(source.open().is_err());
        assert_eq!(source.open_count(), 1);
    }

    #[test]
    fn test_mock_source_read_failure_after_content() {
        let source = MockSource::new("test", "[A]\nk = v\n").with_failing_read(true);
        let mut reader = source.open().unwrap();

        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "[A]\n");
        line.clear();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "k = v\n");
        line.clear();
        assert!(reader.read_line(&mut line).is_err());
    }

    #[test]
    fn test_create_temp_config() {
        let file = create_temp_config("[A]\n");
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "[A]\n");
    }
}
