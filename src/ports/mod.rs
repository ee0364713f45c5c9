// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits separate where configuration text comes from ([`ConfigSource`])
//! from how it is turned into blocks ([`ConfigParser`]). Implementations live in
//! the adapters layer.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::ConfigParser;
pub use source::ConfigSource;
