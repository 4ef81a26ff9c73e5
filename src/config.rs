use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::protocol::codec::DecodeMode;
use crate::utils::limits::MAX_ENCODED_SIZE;

pub const DEFAULT_CONFIG_FILE: &str = "msgwire.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Hex,
    Binary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Enforce encode-side size caps and reject trailing bytes when decoding
    pub strict_decode: bool,
    pub log_filter: String,
    pub max_input_size: usize,
    /// Used by `encode` when no output file is given
    pub output_format: OutputFormat,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            strict_decode: false,
            log_filter: "msgwire=info".to_string(),
            max_input_size: MAX_ENCODED_SIZE,
            output_format: OutputFormat::Hex,
        }
    }
}

impl ToolConfig {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ToolConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load the file if present, otherwise fall back to defaults without writing
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if Path::new(config_file).exists() {
            Self::load(config_file)
        } else if config_path.is_some() {
            anyhow::bail!("config file not found: {}", config_file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, config_path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path.as_ref(), content)?;
        tracing::info!("Wrote config to {:?}", config_path.as_ref());
        Ok(())
    }

    pub fn decode_mode(&self) -> DecodeMode {
        if self.strict_decode {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }
}
