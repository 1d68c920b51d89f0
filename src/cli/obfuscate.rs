//! Obfuscate and deobfuscate command implementations
//!
//! Both commands work on positive record ids only and ignore surrounding
//! whitespace in their argument.

use anyhow::Result;
use clap::Args;

use crate::utils::{deobfuscate_id, deobfuscate_url, obfuscate_id};

#[derive(Args)]
pub struct ObfuscateArgs {
    /// Positive numeric record id
    #[arg(value_name = "ID", allow_hyphen_values = true)]
    pub id: String,
}

#[derive(Args)]
pub struct DeobfuscateArgs {
    /// Obfuscated id, or a URL whose last path segment is one
    #[arg(value_name = "ID|URL", allow_hyphen_values = true)]
    pub value: String,
}

pub fn run(args: ObfuscateArgs) -> Result<()> {
    let value = args.id.trim();
    match value.parse::<i64>() {
        Ok(id) if id > 0 => println!("{}", obfuscate_id(id)),
        _ => anyhow::bail!("Not a valid record id: {value}"),
    }
    Ok(())
}

pub fn run_deobfuscate(args: DeobfuscateArgs) -> Result<()> {
    let value = args.value.trim();
    let id = if value.contains('/') { deobfuscate_url(value) } else { deobfuscate_id(value) };
    if id <= 0 {
        anyhow::bail!("Not a valid obfuscated id: {value}");
    }
    println!("{id}");
    Ok(())
}
