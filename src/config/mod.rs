//! Configuration loading
//!
//! Values come from, in increasing order of precedence: built-in defaults, a
//! TOML file, `RETRO_HELPER_*` environment variables and finally command-line
//! flags (see [`merge`]).

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;
use tracing::debug;

pub mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "retro-helper.toml";

/// Prefix of environment variables overriding config keys.
pub const ENV_PREFIX: &str = "RETRO_HELPER_";

/// Load the configuration, reading `path` when given.
///
/// An explicit path must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let figment = match path {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            debug!("loading config from {}", path.display());
            figment.merge(Toml::file(path))
        }
        None => figment.merge(Toml::file(CONFIG_FILE_NAME)),
    };

    figment.merge(Env::prefixed(ENV_PREFIX)).extract().context("Failed to load configuration")
}
