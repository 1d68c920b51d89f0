//! Config command implementation

use anyhow::Result;
use clap::Args;

use crate::domain::Config;

#[derive(Args)]
pub struct ConfigArgs {
    /// Print as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs, config: Config) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
