//! Info and integrity command implementations

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::{merge_cli_with_config, CliOverrides};
use crate::domain::{ByteFormat, Config, TextEncoding};
use crate::encoding;
use crate::utils::{byte_count, byte_count_float, format_with_commas, integrity_file, time_distance};

#[derive(Args)]
pub struct InfoArgs {
    /// Files to describe
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Emit one JSON object per line
    #[arg(long)]
    pub json: bool,

    /// Use decimal (1000-based) size units
    #[arg(long)]
    pub decimal: bool,

    /// Use seconds granularity for recent modification times
    #[arg(long)]
    pub seconds: bool,
}

#[derive(Args)]
pub struct IntegrityArgs {
    /// Files to digest
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    size_bytes: u64,
    size: String,
    modified: Option<DateTime<Utc>>,
    age: Option<String>,
    encoding: Option<TextEncoding>,
    integrity: String,
}

pub fn run(args: InfoArgs, config: Config) -> Result<()> {
    let overrides = CliOverrides {
        byte_format: args.decimal.then_some(ByteFormat::Decimal),
        include_seconds: args.seconds.then_some(true),
        ..CliOverrides::default()
    };
    let config = merge_cli_with_config(config, overrides);
    let now = Utc::now();

    for path in &args.files {
        let report = describe(path, &config, &now)?;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
            continue;
        }

        println!("{}", report.path);
        println!("  Size:       {} ({} bytes)", report.size, format_with_commas(report.size_bytes));
        if let Some(age) = &report.age {
            println!("  Modified:   {age} ago");
        }
        match report.encoding {
            Some(encoding) => println!("  Encoding:   {encoding}"),
            None => println!("  Encoding:   unknown"),
        }
        println!("  Integrity:  {}", report.integrity);
    }

    Ok(())
}

fn describe(path: &Path, config: &Config, now: &DateTime<Utc>) -> Result<FileReport> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }

    let size_bytes = metadata.len();
    let signed = i64::try_from(size_bytes).unwrap_or(i64::MAX);
    let size = match config.byte_format {
        ByteFormat::Binary => byte_count(signed),
        ByteFormat::Decimal => byte_count_float(signed),
    };

    let modified: Option<DateTime<Utc>> = metadata.modified().ok().map(DateTime::from);
    let age = modified.map(|m| time_distance(&m, now, config.include_seconds));

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let encoding = encoding::determine(BufReader::new(file));
    let integrity = integrity_file(path)?;

    Ok(FileReport {
        path: path.display().to_string(),
        size_bytes,
        size,
        modified,
        age,
        encoding,
        integrity,
    })
}

pub fn run_integrity(args: IntegrityArgs) -> Result<()> {
    for path in &args.files {
        let digest = integrity_file(path)?;
        println!("{digest}  {}", path.display());
    }
    Ok(())
}
