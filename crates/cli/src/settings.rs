use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use glint_engine::{FilterConfig, InitIndexOn};
use glint_runtime::default_config_path;
use log::debug;

/// Load the filter configuration.
///
/// An explicit path must exist. Without one, the default config file is used
/// when present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<FilterConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = default_config_path();
    if path.is_file() {
        read_config(&path)
    } else {
        debug!("no config at {}, using defaults", path.display());
        Ok(FilterConfig::default())
    }
}

pub fn read_config(path: &Path) -> Result<FilterConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Command-line flags that override the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigFlags {
    /// List same-order matches before out-of-order ones
    #[arg(long)]
    pub same_order_first: bool,

    /// Only list matches whose words appear in query order
    #[arg(long)]
    pub same_order_strict: bool,

    /// Characters that separate words (replaces the defaults)
    #[arg(long, value_name = "CHARS")]
    pub split_symbols: Option<String>,

    /// Do not split words on lowercase-to-uppercase transitions
    #[arg(long)]
    pub no_split_by_case: bool,

    /// Tokenize every item before filtering
    #[arg(long)]
    pub eager: bool,
}

impl ConfigFlags {
    /// Apply the flags that were given; unset flags keep the file's values.
    pub fn apply(&self, config: &mut FilterConfig) {
        if self.same_order_first {
            config.filter.same_order_first = true;
        }
        if self.same_order_strict {
            config.filter.same_order_strict = true;
        }
        if let Some(symbols) = &self.split_symbols {
            config.tokenizer.split_symbols = symbols.chars().collect();
        }
        if self.no_split_by_case {
            config.tokenizer.split_by_case = false;
        }
        if self.eager {
            config.init_index_on = InitIndexOn::Construct;
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
