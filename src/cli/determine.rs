//! Determine command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{Config, Signals, TextEncoding};
use crate::encoding::{self, WINDOW_SIZE};
use crate::utils::trunc_filename;

#[derive(Args)]
pub struct DetermineArgs {
    /// Files to examine
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Emit one JSON object per line instead of a table
    #[arg(long)]
    pub json: bool,

    /// Show the signal counts behind each decision
    #[arg(long)]
    pub explain: bool,

    /// Column width for file names in table output
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Determination {
    path: String,
    encoding: Option<TextEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signals: Option<Signals>,
}

pub fn run(args: DetermineArgs, config: Config) -> Result<()> {
    let width = args.width.unwrap_or(config.trunc_width);

    for path in &args.files {
        let determination = determine_file(path, args.explain)?;
        if args.json {
            println!("{}", serde_json::to_string(&determination)?);
            continue;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or(&determination.path);
        let encoding = determination
            .encoding
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!("{:<width$}  {encoding}", trunc_filename(width, name));

        if let Some(signals) = determination.signals {
            println!(
                "{:<width$}  utf8={} box={} box-runs={} glyphs={} esc={} high-bit={} ({} bytes)",
                "",
                signals.utf8_sequences,
                signals.box_drawing,
                signals.box_runs,
                signals.glyph_controls,
                signals.escapes,
                signals.high_bit,
                signals.window_len,
            );
        }
    }

    Ok(())
}

fn determine_file(path: &Path, explain: bool) -> Result<Determination> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let shown = path.display().to_string();

    if !explain {
        let encoding = encoding::determine(BufReader::new(file));
        debug!("{shown}: {encoding:?}");
        return Ok(Determination { path: shown, encoding, signals: None });
    }

    let mut window = Vec::with_capacity(WINDOW_SIZE);
    file.take(WINDOW_SIZE as u64)
        .read_to_end(&mut window)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let explained = encoding::explain_bytes(&window);
    debug!("{shown}: {explained:?}");

    Ok(Determination {
        path: shown,
        encoding: explained.map(|(encoding, _)| encoding),
        signals: explained.map(|(_, signals)| signals),
    })
}
