// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! A source is anything that can be opened as a line-oriented text stream. The
//! store owns one source and reopens it on every load.

use crate::domain::Result;
use std::io::BufRead;

/// A trait for configuration sources.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a source can be moved along with its
/// store or shared between stores.
///
/// # Examples
///
/// ```rust
/// use blockcfg::ports::ConfigSource;
/// use blockcfg::domain::Result;
/// use std::io::{BufRead, Cursor};
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn identifier(&self) -> &str {
///         "fixed"
///     }
///
///     fn open(&self) -> Result<Box<dyn BufRead + '_>> {
///         Ok(Box::new(Cursor::new("[General]\nname = fixed\n")))
///     }
/// }
///
/// let mut reader = Fixed.open().unwrap();
/// let mut first = String::new();
/// reader.read_line(&mut first).unwrap();
/// assert_eq!(first, "[General]\n");
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the identifier of this source.
    ///
    /// Used in log lines, error messages and the diagnostic dump. For files this
    /// is the path.
    fn identifier(&self) -> &str;

    /// Opens the source for reading.
    ///
    /// The returned reader is dropped once the load that opened it finishes,
    /// whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SourceNotFound`](crate::domain::ConfigError::SourceNotFound)
    /// if the source cannot be opened.
    fn open(&self) -> Result<Box<dyn BufRead + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigError, ErrorKind};
    use std::io::Cursor;

    struct TestSource {
        content: Option<&'static str>,
    }

    impl ConfigSource for TestSource {
        fn identifier(&self) -> &str {
            "test"
        }

        fn open(&self) -> Result<Box<dyn BufRead + '_>> {
            match self.content {
                Some(content) => Ok(Box::new(Cursor::new(content))),
                None => Err(ConfigError::SourceNotFound {
                    source_name: self.identifier().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                }),
            }
        }
    }

    #[test]
    fn test_source_open() {
        let source = TestSource {
            content: Some("a\nb\n"),
        };
        let lines: Vec<String> = source.open().unwrap().lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_source_open_failure() {
        let source = TestSource { content: None };
        let err = source.open().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::SourceNotFound);
    }

    #[test]
    fn test_source_is_object_safe() {
        let source: Box<dyn ConfigSource> = Box::new(TestSource { content: Some("") });
        assert_eq!(source.identifier(), "test");
    }
}
