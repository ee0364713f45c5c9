// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the blockcfg crate.
//!
//! This example demonstrates:
//! - Loading a block configuration file
//! - Retrieving typed values (string, int, bool, float)
//! - Handling missing blocks and keys through the last error
//! - Handling conversion failures
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use blockcfg::prelude::*;
use std::io::Write;

const SAMPLE: &str = "\
# Sample configuration
[General]
version = 1.0.0
timeout = 30.5

[Server]
useSSL = true
port = eighty

[Logging]
maxFileSize = 10485760
";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== blockcfg: Basic Usage ===\n");

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(SAMPLE.as_bytes())?;

    let store = ConfigStore::from_file(file.path());
    if !store.last_error().is_none() {
        eprintln!("Failed to load: {}", store.last_error());
        return Ok(());
    }
    store.dump();

    // Example 1: Typed values
    println!("--- Example 1: Typed Values ---");
    let version: String = store.get_value("General", "version")?;
    let timeout: f64 = store.get_value("General", "timeout")?;
    let use_ssl: bool = store.get_value("Server", "useSSL")?;
    let max_size: i64 = store.get_value("Logging", "maxFileSize")?;
    println!("version     = {}", version);
    println!("timeout     = {}", timeout);
    println!("useSSL      = {}", use_ssl);
    println!("maxFileSize = {}", max_size);

    // Example 2: Missing keys fall back to defaults
    println!("\n--- Example 2: Missing Keys ---");
    let retries: u32 = store.get_value("General", "retries")?;
    println!("retries = {} ({})", retries, store.last_error());
    let host: String = store.get_value("Database", "host")?;
    println!("host = {:?} ({})", host, store.last_error());

    // Example 3: Conversion failures are errors
    println!("\n--- Example 3: Conversion Failures ---");
    match store.get_value::<u32>("Server", "port") {
        Ok(port) => println!("port = {}", port),
        Err(e) => println!("✗ {} ({})", e, store.last_error()),
    }

    Ok(())
}
