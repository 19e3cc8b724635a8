//! Facade settings, loadable from YAML.
//!
//! Every key is optional:
//!
//! ```yaml
//! colorize: true
//! color_target: section   # section | ansi | strip
//! boolean:
//!   "true": "yes"
//!   "false": "no"
//! ```

use std::path::{Path, PathBuf};

use placeholder_color::ColorTarget;
use placeholder_engine::Replacer;
use placeholder_lexer::Closure;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a [`PlaceholderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid placeholder config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Text written for boolean placeholder values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanStrings {
    #[serde(rename = "true")]
    pub yes: String,
    #[serde(rename = "false")]
    pub no: String,
}

impl Default for BooleanStrings {
    fn default() -> Self {
        Self {
            yes: "yes".to_string(),
            no: "no".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Run the color pass after substitution.
    pub colorize: bool,
    pub color_target: ColorTarget,
    pub boolean: BooleanStrings,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            colorize: true,
            color_target: ColorTarget::default(),
            boolean: BooleanStrings::default(),
        }
    }
}

impl PlaceholderConfig {
    /// Parses a config from YAML. Blank input yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded placeholder config");
        Ok(config)
    }

    /// A replacer for `closure` carrying this config's color settings.
    pub fn replacer(&self, closure: Closure) -> Replacer {
        Replacer::new(closure)
            .colorize(self.colorize)
            .color_target(self.color_target)
    }

    pub fn format_boolean(&self, value: bool) -> &str {
        if value {
            &self.boolean.yes
        } else {
            &self.boolean.no
        }
    }
}
