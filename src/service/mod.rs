// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration store.
//!
//! [`ConfigStore`] ties a source and a parser together and provides the typed
//! accessors. [`Snapshot`] is its immutable, thread-shareable counterpart.

pub mod config_store;
pub mod snapshot;

// Re-export commonly used types
pub use config_store::{ConfigStore, ConfigStoreBuilder};
pub use snapshot::Snapshot;
