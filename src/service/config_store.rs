// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration store.
//!
//! [`ConfigStore`] owns a source, loads it into a block mapping, records the last
//! error, and converts stored values on request.

use crate::adapters::{BlockParser, FileSource};
use crate::domain::{
    BlockMap, ConfigError, ConfigKey, ConfigValue, ErrorKind, FromConfigValue, Result,
};
use crate::ports::{ConfigParser, ConfigSource};
use crate::service::Snapshot;
use std::cell::Cell;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

const BANNER_OPEN: &str = "********************* CONFIGURATIONS *****************************";
const BANNER_CLOSE: &str = "*****************************************************************";

/// A loaded block configuration with typed accessors.
///
/// The store is meant for a single owner. The last error is kept in a [`Cell`] so
/// lookups can take `&self`, which also makes the store `!Sync`; use
/// [`snapshot`](Self::snapshot) to share a loaded configuration between threads.
///
/// # Examples
///
/// ```rust
/// use blockcfg::adapters::MemorySource;
/// use blockcfg::domain::ErrorKind;
/// use blockcfg::service::ConfigStore;
///
/// let source = MemorySource::new("app.cfg", "[General]\ntimeout = 30.5\n");
/// let store = ConfigStore::with_source(Box::new(source));
///
/// assert_eq!(store.get_value::<f64>("General", "timeout").unwrap(), 30.5);
///
/// // Missing keys fall back to the type's default and record the error
/// assert_eq!(store.get_value::<i32>("General", "retries").unwrap(), 0);
/// assert_eq!(store.last_error(), ErrorKind::KeyNotFound);
/// ```
pub struct ConfigStore {
    source: Option<Box<dyn ConfigSource>>,
    parser: Box<dyn ConfigParser>,
    blocks: BlockMap,
    last_error: Cell<ErrorKind>,
}

impl ConfigStore {
    /// Creates an empty store with no source and no error.
    pub fn new() -> Self {
        Self {
            source: None,
            parser: Box::new(BlockParser::new()),
            blocks: BlockMap::new(),
            last_error: Cell::new(ErrorKind::None),
        }
    }

    /// Creates a configuration store builder.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Creates a store for the file at `path` and loads it immediately.
    ///
    /// A failed load does not fail construction: it is logged and reflected in
    /// [`last_error`](Self::last_error).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blockcfg::domain::ErrorKind;
    /// use blockcfg::service::ConfigStore;
    ///
    /// let store = ConfigStore::from_file("/nonexistent/app.cfg");
    /// assert_eq!(store.last_error(), ErrorKind::SourceNotFound);
    /// assert!(store.is_empty());
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        let mut store = Self::new();
        store.set_source_identifier(path);
        store.load();
        store
    }

    /// Creates a store for `source` and loads it immediately.
    ///
    /// Failures are handled as in [`from_file`](Self::from_file).
    pub fn with_source(source: Box<dyn ConfigSource>) -> Self {
        let mut store = Self::new();
        store.set_source(source);
        store.load();
        store
    }

    /// Creates a store for `config.cfg` in the OS-appropriate config directory and
    /// loads it immediately.
    ///
    /// If the directory cannot be determined the store has no source and records
    /// [`ErrorKind::SourceEmpty`].
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Self {
        let mut store = Self::new();
        if let Some(source) = FileSource::from_default_location(app_name, qualifier) {
            store.set_source(Box::new(source));
        }
        store.load();
        store
    }

    /// Sets the source to the file at `path`.
    ///
    /// An empty path clears the source, so the next load fails with
    /// [`ErrorKind::SourceEmpty`]. The loaded mapping is left untouched until then.
    pub fn set_source_identifier<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            self.source = None;
        } else {
            self.source = Some(Box::new(FileSource::new(path)));
        }
    }

    /// Sets the source to load from.
    pub fn set_source(&mut self, source: Box<dyn ConfigSource>) {
        self.source = Some(source);
    }

    /// Returns the identifier of the current source, if any.
    pub fn source_identifier(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.identifier())
    }

    /// Loads the source, replacing the current mapping.
    ///
    /// Returns `true` on success. On failure the error is logged, recorded as the
    /// last error, and any entries read before the failure are kept.
    pub fn load(&mut self) -> bool {
        match self.try_load() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error: {}: {}", e.kind(), e);
                false
            }
        }
    }

    /// Loads the source, replacing the current mapping, and returns the detailed error.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::SourceEmpty`] if no source is set; no I/O is attempted
    /// - [`ConfigError::SourceNotFound`] if the source cannot be opened
    /// - [`ConfigError::ReadError`] if reading fails part way through
    /// - [`ConfigError::ParseError`] on the first malformed line
    pub fn try_load(&mut self) -> Result<()> {
        self.blocks.clear();
        let result = self.read_source();
        if result.is_ok() {
            tracing::debug!(
                "Loaded {} block(s) from '{}'",
                self.blocks.len(),
                self.source_identifier().unwrap_or_default()
            );
        }
        self.record(result)
    }

    fn read_source(&mut self) -> Result<()> {
        let source = self.source.as_ref().ok_or(ConfigError::SourceEmpty)?;
        let mut reader = source.open()?;
        self.parser
            .parse_into(source.identifier(), &mut *reader, &mut self.blocks)
    }

    /// Returns the error recorded by the most recent load or lookup.
    pub fn last_error(&self) -> ErrorKind {
        self.last_error.get()
    }

    /// Retrieves and converts the value of `key` in `block`.
    ///
    /// A missing block or key is not an error here: the type's default is returned
    /// and [`ErrorKind::BlockNotFound`] or [`ErrorKind::KeyNotFound`] is recorded.
    /// Use [`try_get`](Self::try_get) to treat those as errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TypeConversionError`] if the stored value cannot be
    /// converted to `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blockcfg::adapters::MemorySource;
    /// use blockcfg::domain::ErrorKind;
    /// use blockcfg::service::ConfigStore;
    ///
    /// let store = ConfigStore::with_source(Box::new(MemorySource::new(
    ///     "app.cfg",
    ///     "[Server]\nuseSSL = yes\n",
    /// )));
    ///
    /// assert!(!store.get_value::<bool>("Client", "useSSL").unwrap());
    /// assert_eq!(store.last_error(), ErrorKind::BlockNotFound);
    ///
    /// assert!(store.get_value::<bool>("Server", "useSSL").is_err());
    /// assert_eq!(store.last_error(), ErrorKind::ConversionFailure);
    /// ```
    pub fn get_value<T: FromConfigValue>(&self, block: &str, key: &str) -> Result<T> {
        match self.try_get(block, key) {
            Err(e) if e.is_not_found() => {
                tracing::warn!("{}; using default {} value", e, T::TYPE_NAME);
                Ok(T::default())
            }
            other => other,
        }
    }

    /// Retrieves and converts the value of `key` in `block`, failing if it is missing.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::BlockNotFound`] if the block does not exist
    /// - [`ConfigError::KeyNotFound`] if the key does not exist in the block
    /// - [`ConfigError::TypeConversionError`] if the value cannot be converted
    pub fn try_get<T: FromConfigValue>(&self, block: &str, key: &str) -> Result<T> {
        let result = self.lookup(block, key).and_then(|raw| {
            T::from_config_value(
                &ConfigValue::from(raw),
                &ConfigKey::new(block, key).to_string(),
            )
        });
        self.record(result)
    }

    /// Retrieves the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlockNotFound`] or [`ConfigError::KeyNotFound`].
    pub fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        let result = self.lookup(key.block(), key.name()).map(ConfigValue::from);
        self.record(result)
    }

    /// Retrieves the raw value for `key`, or `default` if it is missing.
    pub fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue {
        self.get(key).unwrap_or_else(|_| ConfigValue::from(default))
    }

    fn lookup(&self, block: &str, key: &str) -> Result<&str> {
        let entries = self
            .blocks
            .get(block)
            .ok_or_else(|| ConfigError::BlockNotFound {
                block: block.to_string(),
            })?;
        entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: ConfigKey::new(block, key),
            })
    }

    fn record<T>(&self, result: Result<T>) -> Result<T> {
        self.last_error.set(match &result {
            Ok(_) => ErrorKind::None,
            Err(e) => e.kind(),
        });
        result
    }

    /// Returns `true` if `key` exists in `block`. Does not touch the last error.
    pub fn has(&self, block: &str, key: &str) -> bool {
        self.blocks
            .get(block)
            .is_some_and(|entries| entries.contains_key(key))
    }

    /// Returns `true` if `block` holds at least one key. Does not touch the last error.
    pub fn has_block(&self, block: &str) -> bool {
        self.blocks.contains_key(block)
    }

    /// Returns the block names, sorted.
    pub fn block_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the key names of `block`, sorted. Empty if the block does not exist.
    pub fn keys(&self, block: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .blocks
            .get(block)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Returns the loaded mapping.
    pub fn blocks(&self) -> &BlockMap {
        &self.blocks
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no block is loaded.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns an immutable copy of the loaded configuration that can be shared
    /// between threads.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.source_identifier().map(str::to_string),
            &self.blocks,
        )
    }

    /// Writes the diagnostic dump to standard output.
    pub fn dump(&self) {
        print!("{}", self);
    }

    /// Writes the diagnostic dump to `writer`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use blockcfg::adapters::MemorySource;
    /// use blockcfg::service::ConfigStore;
    ///
    /// let store = ConfigStore::with_source(Box::new(MemorySource::new(
    ///     "app.cfg",
    ///     "[Server]\nuseSSL = true\n",
    /// )));
    ///
    /// let mut out = Vec::new();
    /// store.dump_to(&mut out).unwrap();
    /// let text = String::from_utf8(out).unwrap();
    /// assert!(text.contains("File name : app.cfg"));
    /// assert!(text.contains("[Server]\nuseSSL=true\n"));
    /// ```
    pub fn dump_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BANNER_OPEN)?;
        writeln!(
            f,
            "File name : {}",
            self.source_identifier().unwrap_or_default()
        )?;
        for block in self.block_names() {
            writeln!(f, "[{}]", block)?;
            for key in self.keys(block) {
                writeln!(f, "{}={}", key, self.blocks[block][key])?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", BANNER_CLOSE)
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("source", &self.source_identifier())
            .field("blocks", &self.blocks)
            .field("last_error", &self.last_error.get())
            .finish()
    }
}

/// Builder for constructing a [`ConfigStore`].
///
/// # Examples
///
/// ```rust
/// use blockcfg::adapters::{BlockParser, MemorySource};
/// use blockcfg::service::ConfigStore;
///
/// # fn main() -> blockcfg::domain::Result<()> {
/// let store = ConfigStore::builder()
///     .with_source(Box::new(MemorySource::new("mem", "[A]\nk = v\n")))
///     .with_parser(Box::new(BlockParser::new()))
///     .load()?;
/// assert_eq!(store.get_value::<String>("A", "k")?, "v");
/// # Ok(())
/// # }
/// ```
pub struct ConfigStoreBuilder {
    source: Option<Box<dyn ConfigSource>>,
    parser: Option<Box<dyn ConfigParser>>,
}

impl ConfigStoreBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            source: None,
            parser: None,
        }
    }

    /// Uses the file at `path` as the source.
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.with_source(Box::new(FileSource::new(path)))
    }

    /// Uses `source` as the source.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Uses `parser` instead of the default [`BlockParser`].
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Builds the store without loading it.
    pub fn build(self) -> ConfigStore {
        let mut store = ConfigStore::new();
        store.source = self.source;
        if let Some(parser) = self.parser {
            store.parser = parser;
        }
        store
    }

    /// Builds the store and loads it.
    ///
    /// # Errors
    ///
    /// Returns the load error; see [`ConfigStore::try_load`].
    pub fn load(self) -> Result<ConfigStore> {
        let mut store = self.build();
        store.try_load()?;
        Ok(store)
    }
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemorySource;

    const SAMPLE: &str = "\
[General]
version = 1.0.0
timeout = 30.5
[Server]
useSSL = true
[Logging]
maxFileSize = 10485760
";

    fn sample_store() -> ConfigStore {
        ConfigStore::with_source(Box::new(MemorySource::new("sample.cfg", SAMPLE)))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ConfigStore::new();
        assert!(store.is_empty());
        assert_eq!(store.last_error(), ErrorKind::None);
        assert_eq!(store.source_identifier(), None);
    }

    #[test]
    fn test_load_without_source_is_source_empty() {
        let mut store = ConfigStore::new();
        assert!(!store.load());
        assert_eq!(store.last_error(), ErrorKind::SourceEmpty);
        assert!(matches!(store.try_load(), Err(ConfigError::SourceEmpty)));
    }

    #[test]
    fn test_empty_source_identifier_clears_source() {
        let mut store = ConfigStore::new();
        store.set_source_identifier("app.cfg");
        assert_eq!(store.source_identifier(), Some("app.cfg"));

        store.set_source_identifier("");
        assert_eq!(store.source_identifier(), None);
        assert!(!store.load());
        assert_eq!(store.last_error(), ErrorKind::SourceEmpty);
    }

    #[test]
    fn test_sample_values() {
        let store = sample_store();
        assert_eq!(store.last_error(), ErrorKind::None);

        assert_eq!(
            store.get_value::<String>("General", "version").unwrap(),
            "1.0.0"
        );
        assert_eq!(store.get_value::<f64>("General", "timeout").unwrap(), 30.5);
        assert!(store.get_value::<bool>("Server", "useSSL").unwrap());
        assert_eq!(
            store.get_value::<i32>("Logging", "maxFileSize").unwrap(),
            10485760
        );
        assert_eq!(store.last_error(), ErrorKind::None);
    }

    #[test]
    fn test_get_value_missing_key_returns_default() {
        let store = sample_store();
        assert!(!store.get_value::<bool>("General", "nope").unwrap());
        assert_eq!(store.last_error(), ErrorKind::KeyNotFound);

        assert_eq!(store.get_value::<String>("General", "nope").unwrap(), "");
        assert_eq!(store.get_value::<f32>("General", "nope").unwrap(), 0.0);
    }

    #[test]
    fn test_get_value_missing_block_returns_default() {
        let store = sample_store();
        assert!(!store.get_value::<bool>("NoSuchBlock", "x").unwrap());
        assert_eq!(store.last_error(), ErrorKind::BlockNotFound);
    }

    #[test]
    fn test_get_value_conversion_failure_is_error() {
        let store = sample_store();
        let err = store.get_value::<i32>("General", "version").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConversionFailure);
        assert!(err.to_string().contains("General.version"));
        assert_eq!(store.last_error(), ErrorKind::ConversionFailure);
    }

    #[test]
    fn test_last_error_is_overwritten_by_success() {
        let store = sample_store();
        store.get_value::<i32>("Nope", "x").unwrap();
        assert_eq!(store.last_error(), ErrorKind::BlockNotFound);
        store.get_value::<i32>("Logging", "maxFileSize").unwrap();
        assert_eq!(store.last_error(), ErrorKind::None);
    }

    #[test]
    fn test_try_get_is_strict() {
        let store = sample_store();
        assert!(matches!(
            store.try_get::<i32>("Nope", "x"),
            Err(ConfigError::BlockNotFound { .. })
        ));
        assert!(matches!(
            store.try_get::<i32>("General", "x"),
            Err(ConfigError::KeyNotFound { .. })
        ));
        assert_eq!(store.try_get::<u64>("Logging", "maxFileSize").unwrap(), 10485760);
    }

    #[test]
    fn test_get_raw() {
        let store = sample_store();
        let value = store.get(&ConfigKey::new("General", "version")).unwrap();
        assert_eq!(value.as_str(), "1.0.0");

        let missing = ConfigKey::new("General", "missing");
        assert!(store.get(&missing).is_err());
        assert_eq!(store.last_error(), ErrorKind::KeyNotFound);
        assert_eq!(store.get_or_default(&missing, "fallback").as_str(), "fallback");
    }

    #[test]
    fn test_inspection_does_not_touch_last_error() {
        let store = sample_store();
        store.get_value::<i32>("Nope", "x").unwrap();

        assert!(store.has("General", "version"));
        assert!(!store.has("General", "missing"));
        assert!(store.has_block("Server"));
        assert_eq!(store.block_names(), vec!["General", "Logging", "Server"]);
        assert_eq!(store.keys("General"), vec!["timeout", "version"]);
        assert!(store.keys("Nope").is_empty());
        assert_eq!(store.len(), 3);

        assert_eq!(store.last_error(), ErrorKind::BlockNotFound);
    }

    #[test]
    fn test_parse_failure_keeps_partial_mapping() {
        let store = ConfigStore::with_source(Box::new(MemorySource::new(
            "bad.cfg",
            "[A]\nk = v\noops\nlater = 1\n",
        )));

        assert_eq!(store.last_error(), ErrorKind::ParseFailure);
        assert_eq!(store.get_value::<String>("A", "k").unwrap(), "v");
        assert!(!store.has("A", "later"));
    }

    #[test]
    fn test_reload_replaces_mapping() {
        let mut store = ConfigStore::with_source(Box::new(MemorySource::new(
            "first",
            "[A]\nold = 1\n",
        )));
        assert!(store.has("A", "old"));

        store.set_source(Box::new(MemorySource::new("second", "[B]\nnew = 2\n")));
        assert!(store.load());

        assert!(!store.has_block("A"));
        assert!(store.has("B", "new"));
        assert_eq!(store.source_identifier(), Some("second"));
    }

    #[test]
    fn test_failed_reload_clears_mapping() {
        let mut store = sample_store();
        store.set_source_identifier("/nonexistent/path/app.cfg");

        assert!(!store.load());
        assert_eq!(store.last_error(), ErrorKind::SourceNotFound);
        assert!(store.is_empty());
    }

    #[test]
    fn test_dump_format() {
        let store = ConfigStore::with_source(Box::new(MemorySource::new(
            "dump.cfg",
            "[B]\ny = 2\nx = 1\n[A]\nk = v\n",
        )));

        let mut out = Vec::new();
        store.dump_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = format!(
            "{}\nFile name : dump.cfg\n[A]\nk=v\n\n[B]\nx=1\ny=2\n\n{}\n",
            BANNER_OPEN, BANNER_CLOSE
        );
        assert_eq!(text, expected);
        assert_eq!(store.to_string(), expected);
    }

    #[test]
    fn test_dump_empty_store() {
        let text = ConfigStore::new().to_string();
        assert_eq!(
            text,
            format!("{}\nFile name : \n{}\n", BANNER_OPEN, BANNER_CLOSE)
        );
    }

    #[test]
    fn test_builder_build_does_not_load() {
        let store = ConfigStore::builder()
            .with_source(Box::new(MemorySource::new("mem", "[A]\nk = v\n")))
            .build();
        assert!(store.is_empty());
        assert_eq!(store.source_identifier(), Some("mem"));
    }

    #[test]
    fn test_builder_load_propagates_error() {
        let result = ConfigStoreBuilder::default()
            .with_file("/nonexistent/path/app.cfg")
            .load();
        assert!(matches!(result, Err(ConfigError::SourceNotFound { .. })));
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", sample_store());
        assert!(debug.contains("sample.cfg"));
        assert!(debug.contains("last_error: None"));
    }
}
