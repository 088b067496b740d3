//! bbami - Application Meta Information
//!
//! Main entry point for the bbami CLI.

use anyhow::Context;
use bbami::config::MANIFEST_ENV_VAR;
use bbami::{AppInfo, AttributeId, ManifestLocation, API_VERSION};
use clap::Parser;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process;

/// bbami - Inspect an application manifest
///
/// With no attribute, prints every attribute present in the manifest.
#[derive(Parser, Debug)]
#[command(name = "bbami")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the manifest (default: $HOME/MANIFEST/MANIFEST.MF)
    #[arg(short, long, env = MANIFEST_ENV_VAR)]
    manifest: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Attribute to print (e.g., Package-Version)
    #[arg(conflicts_with = "count")]
    attribute: Option<AttributeId>,

    /// Value index, starting from 0
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    index: i64,

    /// Print the number of values an attribute has
    #[arg(short, long, value_name = "ATTRIBUTE")]
    count: Option<AttributeId>,
}

/// What the command line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    All,
    Value { attribute: AttributeId, index: i64 },
    Count(AttributeId),
}

impl Cli {
    fn request(&self) -> Request {
        match (self.attribute, self.count) {
            (Some(attribute), _) => Request::Value {
                attribute,
                index: self.index,
            },
            (None, Some(attribute)) => Request::Count(attribute),
            (None, None) => Request::All,
        }
    }
}

fn main() {
    // Initialize logging
    if let Err(e) = bbami::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let request = cli.request();
    let location = ManifestLocation::from(cli.manifest);
    let info = bbami::init(API_VERSION, location).context("Failed to load manifest")?;

    print!("{}", render(&info, request, cli.json)?);
    Ok(())
}

fn render(info: &AppInfo, request: Request, json: bool) -> anyhow::Result<String> {
    let mut out = String::new();

    match request {
        Request::All if json => {
            writeln!(out, "{}", serde_json::to_string_pretty(info.store()?)?)?;
        }
        Request::All => {
            for (id, slot) in info.store()?.iter() {
                for value in slot.values() {
                    writeln!(out, "{}: {}", id, value)?;
                }
            }
        }
        Request::Value { attribute, index } => {
            let value = info
                .query_by_index(attribute, index)
                .with_context(|| format!("Cannot read {}", attribute))?;
            if json {
                writeln!(out, "{}", serde_json::to_string(&value)?)?;
            } else {
                writeln!(out, "{}", value)?;
            }
        }
        Request::Count(attribute) => {
            writeln!(out, "{}", info.value_count(attribute)?)?;
        }
    }

    Ok(out)
}
