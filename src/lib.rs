// SPDX-License-Identifier: MIT OR Apache-2.0

//! A block-structured configuration loader with typed accessors.
//!
//! Configuration files are organized into named blocks of `key = value` pairs:
//!
//! ```text
//! # Application settings
//! [General]
//! version = 1.0.0
//! timeout = 30.5
//!
//! [Server]
//! useSSL = true
//! ```
//!
//! Values are stored as raw strings and converted only when requested, to `i32`,
//! `i64`, `u32`, `u64`, `f32`, `f64`, `bool` or `String`.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `ErrorKind`, errors)
//! - **Ports**: Trait definitions (`ConfigSource`, `ConfigParser`)
//! - **Adapters**: The block-file parser and the file and in-memory sources
//! - **Service**: `ConfigStore`, which loads a source and serves typed lookups
//!
//! # Error reporting
//!
//! Every load and lookup records an [`ErrorKind`](domain::ErrorKind) as the store's
//! last error. A missing block or key makes
//! [`get_value`](service::ConfigStore::get_value) return the type's default, while
//! a value that cannot be converted is an `Err`.
//!
//! # Feature Flags
//!
//! - `cli`: Build the `blockcfg` command-line tool
//!
//! # Quick Start
//!
//! ```rust
//! use blockcfg::prelude::*;
//!
//! let source = MemorySource::new(
//!     "app.cfg",
//!     "[General]\nversion = 1.0.0\n[Logging]\nmaxFileSize = 10485760\n",
//! );
//! let store = ConfigStore::with_source(Box::new(source));
//! assert_eq!(store.last_error(), ErrorKind::None);
//!
//! let version: String = store.get_value("General", "version").unwrap();
//! let max_size: i64 = store.get_value("Logging", "maxFileSize").unwrap();
//! assert_eq!(version, "1.0.0");
//! assert_eq!(max_size, 10485760);
//!
//! let missing: bool = store.get_value("General", "nope").unwrap();
//! assert!(!missing);
//! assert_eq!(store.last_error(), ErrorKind::KeyNotFound);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{BlockParser, FileSource, MemorySource};
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, ErrorKind, FromConfigValue, Result,
    };
    pub use crate::ports::{ConfigParser, ConfigSource};
    pub use crate::service::{ConfigStore, ConfigStoreBuilder, Snapshot};
}
