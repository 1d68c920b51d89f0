//! Convert command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use super::parse_encoding_arg;
use crate::config::{merge_cli_with_config, CliOverrides};
use crate::domain::Config;
use crate::encoding::decode_to_string;

#[derive(Args)]
pub struct ConvertArgs {
    /// File to convert
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Decode as this encoding instead of detecting it (utf-8|latin1|cp437)
    #[arg(long, value_name = "ENC")]
    pub from: Option<String>,

    /// Encoding assumed when detection has no answer
    #[arg(long, value_name = "ENC")]
    pub fallback: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: ConvertArgs, config: Config) -> Result<()> {
    let from = parse_encoding_arg(args.from.as_deref())?;
    let overrides = CliOverrides {
        fallback_encoding: parse_encoding_arg(args.fallback.as_deref())?,
        ..CliOverrides::default()
    };
    let config = merge_cli_with_config(config, overrides);

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let mut reader = BufReader::new(file);

    let (encoding, text) = match from {
        Some(encoding) => {
            let mut bytes = Vec::new();
            reader
                .read_to_end(&mut bytes)
                .with_context(|| format!("Failed to read {}", args.file.display()))?;
            (encoding, encoding.decode(&bytes).into_owned())
        }
        None => decode_to_string(reader, config.fallback_encoding)
            .with_context(|| format!("Failed to read {}", args.file.display()))?,
    };
    debug!("{} decoded as {encoding}", args.file.display());

    match &args.output {
        Some(path) => {
            std::fs::write(path, text.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {} ({encoding})", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
