//! retro-helper: detect and convert the encoding of legacy text files
//!
//! Reads NFO, DIZ and other DOS-era text files and reports or converts their
//! encoding to UTF-8.

use anyhow::Result;

fn main() -> Result<()> {
    retro_helper::cli::run()
}
