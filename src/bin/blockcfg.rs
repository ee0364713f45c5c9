// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loads a block configuration file, prints it, and optionally prints one typed value.
//!
//! ```bash
//! blockcfg app.cfg
//! blockcfg app.cfg --get Server useSSL --type bool
//! ```

use blockcfg::prelude::*;
use clap::{Arg, ArgAction, Command};
use std::process::ExitCode;

fn command() -> Command {
    Command::new("blockcfg")
        .about("Load a block configuration file and print its contents")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .required(true)
                .help("Configuration file to load"),
        )
        .arg(
            Arg::new("get")
                .long("get")
                .num_args(2)
                .value_names(["BLOCK", "KEY"])
                .help("Print the value of KEY in BLOCK"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .value_parser(["string", "int", "float", "bool"])
                .default_value("string")
                .help("Type to convert the --get value to"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Do not print the whole configuration"),
        )
}

fn print_value(store: &ConfigStore, block: &str, key: &str, ty: &str) -> Result<()> {
    let rendered = match ty {
        "int" => store.get_value::<i64>(block, key)?.to_string(),
        "float" => store.get_value::<f64>(block, key)?.to_string(),
        "bool" => store.get_value::<bool>(block, key)?.to_string(),
        _ => store.get_value::<String>(block, key)?,
    };
    println!("Value : {}", rendered);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let file = matches
        .get_one::<String>("file")
        .map(String::as_str)
        .unwrap_or_default();

    let store = ConfigStore::from_file(file);
    if !matches.get_flag("quiet") {
        store.dump();
    }
    if !store.last_error().is_none() {
        eprintln!(
            "{} encountered an error: {}",
            file,
            store.last_error().message()
        );
        return ExitCode::FAILURE;
    }

    if let Some(mut args) = matches.get_many::<String>("get") {
        let (Some(block), Some(key)) = (args.next(), args.next()) else {
            return ExitCode::FAILURE;
        };
        let ty = matches
            .get_one::<String>("type")
            .map(String::as_str)
            .unwrap_or("string");

        if let Err(e) = print_value(&store, block, key, ty) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        if !store.last_error().is_none() {
            eprintln!("Warning: {}", store.last_error().message());
        }
    }

    ExitCode::SUCCESS
}
