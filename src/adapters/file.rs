// SPDX-License-Identifier: MIT OR Apache-2.0

//! File configuration source adapter.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigSource;
use directories::ProjectDirs;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File name looked up by [`FileSource::from_default_location`].
pub const DEFAULT_FILE_NAME: &str = "config.cfg";

/// Configuration source backed by a file on disk.
///
/// The file is opened on every load and closed when the load finishes.
///
/// # Examples
///
/// ```rust,no_run
/// use blockcfg::adapters::FileSource;
/// use blockcfg::ports::ConfigSource;
///
/// let source = FileSource::new("/etc/myapp/app.cfg");
/// assert_eq!(source.identifier(), "/etc/myapp/app.cfg");
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    identifier: String,
}

impl FileSource {
    /// Creates a source for the file at `path`.
    ///
    /// The path is not checked until the source is opened.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let identifier = path.display().to_string();
        Self { path, identifier }
    }

    /// Creates a source for [`DEFAULT_FILE_NAME`] in the OS-appropriate config directory.
    ///
    /// Returns `None` if no home directory can be determined.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Option<Self> {
        Self::with_filename(app_name, qualifier, DEFAULT_FILE_NAME)
    }

    /// Creates a source for `filename` in the OS-appropriate config directory.
    ///
    /// Returns `None` if no home directory can be determined.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Option<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name)?;
        Some(Self::new(proj_dirs.config_dir().join(filename)))
    }

    /// Returns the path to the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path).map_err(|e| ConfigError::SourceNotFound {
            source_name: self.identifier.clone(),
            source: e,
        })?;
        Ok(Box::new(BufReader::new(file)))
    }
}
