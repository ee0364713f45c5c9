// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing parser and source implementations.
//!
//! This module contains the concrete implementations of the traits defined in the
//! ports layer: the block-file parser and the file and in-memory sources.

pub mod block_parser;
pub mod file;
pub mod memory;

pub use block_parser::BlockParser;
pub use file::FileSource;
pub use memory::MemorySource;
