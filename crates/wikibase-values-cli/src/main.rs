//! Command-line normalizer for Wikibase data value JSON.
//!
//! Usage:
//!   wbvalues normalize values.json
//!   wbvalues normalize --type quantity < payload.json
//!   wbvalues exact -42
//!
//! `normalize` decodes every value and prints the re-encoded form, so units
//! given as URIs come back as compact identifiers.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wikibase_values::codec::{decode_data_value_with_options, decode_typed_value, encode_payload, resolve_tag};
use wikibase_values::{encode_data_value, encode_quantity, validate_data_value, DecodeOptions, QuantityValue};

#[derive(Parser, Debug)]
#[command(name = "wbvalues")]
#[command(about = "Decode, validate and normalize Wikibase data values")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode data values and print their normalized encoding
    Normalize {
        /// Input file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Treat the input as flattened payload(s) of this type tag
        #[arg(short = 't', long = "type")]
        tag: Option<String>,

        /// Reject quantities whose amounts are not sign-prefixed decimals
        #[arg(long)]
        strict: bool,

        /// Also run semantic validation on every value
        #[arg(long)]
        validate: bool,
    },

    /// Print the exact quantity for an integer
    Exact {
        /// The integer value
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

/// How `normalize` interprets and checks its input.
#[derive(Debug, Clone, Default)]
struct NormalizeConfig {
    tag: Option<String>,
    options: DecodeOptions,
    validate: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let output = match args.command {
        Command::Normalize { file, tag, strict, validate } => {
            let input = read_input(file.as_ref())?;
            let document: Value = serde_json::from_str(&input).context("input is not valid JSON")?;
            let config = NormalizeConfig {
                tag,
                options: if strict { DecodeOptions::strict() } else { DecodeOptions::new() },
                validate,
            };
            normalize_document(&document, &config)?
        }
        Command::Exact { value } => encode_quantity(&QuantityValue::from_integer(value)),
    };

    let rendered = if args.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            info!("Reading: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Normalizes a single value or an array of values.
fn normalize_document(document: &Value, config: &NormalizeConfig) -> Result<Value> {
    match document {
        Value::Array(items) => {
            debug!("normalizing {} values", items.len());
            let normalized = items
                .iter()
                .enumerate()
                .map(|(i, item)| normalize_one(item, config).with_context(|| format!("value #{i}")))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(normalized))
        }
        single => normalize_one(single, config),
    }
}

fn normalize_one(item: &Value, config: &NormalizeConfig) -> Result<Value> {
    let (value, output) = match &config.tag {
        Some(tag) => {
            let data_type = resolve_tag(tag)?;
            let value = decode_typed_value(data_type, Some(item), config.options)?;
            let output = encode_payload(&value);
            (value, output)
        }
        None => {
            let value = decode_data_value_with_options(Some(item), config.options)?;
            let output = encode_data_value(&value);
            (value, output)
        }
    };

    if config.validate {
        if let Err(err) = validate_data_value(&value) {
            bail!("{} value failed validation: {err}", value.type_tag());
        }
    }
    Ok(output)
}
