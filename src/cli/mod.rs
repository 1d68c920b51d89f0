//! Command-line interface for retro-helper
//!
//! Provides `determine`, `convert`, `info`, `integrity`, `obfuscate`,
//! `deobfuscate` and `config` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::load_config;

mod convert;
mod determine;
mod info;
mod obfuscate;
mod show_config;

/// Detect and convert the encoding of legacy DOS-era text files
#[derive(Parser)]
#[command(name = "retro-helper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./retro-helper.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Determine the text encoding of files
    Determine(determine::DetermineArgs),

    /// Print a file converted to UTF-8
    Convert(convert::ConvertArgs),

    /// Show size, age, encoding and integrity digest of files
    Info(info::InfoArgs),

    /// Print the sha384 integrity digest of files
    Integrity(info::IntegrityArgs),

    /// Obfuscate a numeric record id
    Obfuscate(obfuscate::ObfuscateArgs),

    /// Recover a record id from an obfuscated id or URL
    Deobfuscate(obfuscate::DeobfuscateArgs),

    /// Print the effective configuration as TOML
    Config(show_config::ConfigArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Determine(args) => determine::run(args, config),
        Commands::Convert(args) => convert::run(args, config),
        Commands::Info(args) => info::run(args, config),
        Commands::Integrity(args) => info::run_integrity(args),
        Commands::Obfuscate(args) => obfuscate::run(args),
        Commands::Deobfuscate(args) => obfuscate::run_deobfuscate(args),
        Commands::Config(args) => show_config::run(args, config),
    }
}

/// Parse an optional `--from` / `--fallback` style encoding argument.
fn parse_encoding_arg(value: Option<&str>) -> Result<Option<crate::domain::TextEncoding>> {
    match value {
        Some(raw) => match raw.parse() {
            Ok(encoding) => Ok(Some(encoding)),
            Err(_) => anyhow::bail!("Invalid encoding '{raw}'. Use: utf-8|latin1|cp437"),
        },
        None => Ok(None),
    }
}
