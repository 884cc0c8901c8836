//! `hcl` CLI — check, reformat, convert, and query HCL v1 files.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a file (stdin → report)
//! cat config.hcl | hcl check
//!
//! # Validate a file on disk
//! hcl check -i config.hcl
//!
//! # Reformat through the convenience serialiser
//! hcl fmt -i config.hcl
//!
//! # Convert to JSON
//! hcl json -i config.hcl --pretty
//!
//! # Look up a dotted path
//! hcl get instance.web.count -i config.hcl
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hcl_core::Value;

#[derive(Parser)]
#[command(name = "hcl", version, about = "HCL v1 configuration tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the input and report whether it is valid HCL
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse the input and emit it through the convenience serialiser
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse the input and emit JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Look up a dotted path and print the value
    Get {
        /// Dotted path, e.g. `instance.web.count`
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            hcl_core::parse(&text).context("input is not valid HCL")?;
            println!("OK");
        }
        Commands::Fmt { input, output } => {
            let text = read_input(input.as_deref())?;
            let value = hcl_core::parse(&text).context("failed to parse HCL")?;
            write_output(output.as_deref(), &value.to_string())?;
        }
        Commands::Json {
            input,
            output,
            pretty,
        } => {
            let text = read_input(input.as_deref())?;
            let value = hcl_core::parse(&text).context("failed to parse HCL")?;
            let json = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Get { path, input } => {
            let text = read_input(input.as_deref())?;
            let value = hcl_core::parse(&text).context("failed to parse HCL")?;
            let found = value
                .find(path.as_str())
                .with_context(|| format!("path not found: {path}"))?;
            print_value(found)?;
        }
    }

    Ok(())
}

/// Scalars print as bare text; containers and null as JSON.
fn print_value(value: &Value) -> Result<()> {
    match value {
        Value::String(s) => println!("{s}"),
        Value::Bool(b) => println!("{b}"),
        Value::Int(n) => println!("{n}"),
        Value::Double(d) => println!("{d}"),
        other => println!("{}", serde_json::to_string(other)?),
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            print!("{content}");
        }
    }
    Ok(())
}
