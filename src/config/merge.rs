//! CLI argument merging with config

use crate::domain::{ByteFormat, Config, TextEncoding};

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub fallback_encoding: Option<TextEncoding>,
    pub include_seconds: Option<bool>,
    pub byte_format: Option<ByteFormat>,
    pub trunc_width: Option<usize>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(fallback_encoding) = cli.fallback_encoding {
        base_config.fallback_encoding = fallback_encoding;
    }
    if let Some(include_seconds) = cli.include_seconds {
        base_config.include_seconds = include_seconds;
    }
    if let Some(byte_format) = cli.byte_format {
        base_config.byte_format = byte_format;
    }
    if let Some(trunc_width) = cli.trunc_width {
        base_config.trunc_width = trunc_width;
    }

    base_config
}
