use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::render::DEFAULT_INDENT;

/// Optional per-directory config file
pub const CONFIG_FILE: &str = "backchain.toml";

/// Environment override for `[rules] source`
pub const RULES_ENV_VAR: &str = "BACKCHAIN_RULES";

/// Configuration for backchain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesSection,
    #[serde(default)]
    pub render: RenderSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesSection {
    /// Built-in rule set name or path to a rule file
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "zookeeper".to_string()
}

impl Default for RulesSection {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSection {
    /// Spaces per nesting level in text output
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

impl Config {
    /// Load configuration from the current directory
    pub fn load() -> Result<Self> {
        let project_root = std::env::current_dir()?;
        Self::load_from(&project_root)
    }

    /// Load `backchain.toml` from `dir`, or defaults if it doesn't exist
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Rule source to use: the CLI flag, then `BACKCHAIN_RULES`, then the
    /// config file.
    pub fn rules_source(&self, flag: Option<&str>) -> String {
        self.rules_source_from(flag, std::env::var(RULES_ENV_VAR).ok())
    }

    /// Same precedence as [`Config::rules_source`] with the environment
    /// value passed in. An empty `env` value counts as unset.
    pub fn rules_source_from(&self, flag: Option<&str>, env: Option<String>) -> String {
        if let Some(source) = flag {
            return source.to_string();
        }
        match env {
            Some(source) if !source.is_empty() => source,
            _ => self.rules.source.clone(),
        }
    }
}
