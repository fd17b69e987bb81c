//! Engine configuration storage
//!
//! Handles loading and saving the reorder settings shared by every
//! reorderable list in the editor.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::constants::{defaults, files};
use crate::types::OrderBase;

/// Reorder engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderConfig {
    /// Offset used when renumbering order keys after a commit
    #[serde(default)]
    pub order_base: OrderBase,
    /// Whether Escape cancels an active drag
    #[serde(default = "default_escape_cancels")]
    pub escape_cancels: bool,
    /// Whether events are forwarded to the configured sink
    #[serde(default = "default_emit_events")]
    pub emit_events: bool,
}

fn default_escape_cancels() -> bool {
    defaults::ESCAPE_CANCELS
}

fn default_emit_events() -> bool {
    defaults::EMIT_EVENTS
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            order_base: OrderBase::default(),
            escape_cancels: default_escape_cancels(),
            emit_events: default_emit_events(),
        }
    }
}

impl ReorderConfig {
    /// Load configuration from `config_dir`
    ///
    /// A missing file yields the defaults.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(files::CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config = serde_json::from_str(&contents).map_err(ConfigError::Parse)?;
        log::info!("Reorder configuration loaded from {:?}", config_path);
        Ok(config)
    }

    /// Save configuration to `config_dir`
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir)?;

        let config_path = config_dir.join(files::CONFIG_FILE);
        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(&config_path, contents)?;

        log::info!("Reorder configuration saved to {:?}", config_path);
        Ok(())
    }

    pub fn with_order_base(mut self, order_base: OrderBase) -> Self {
        self.order_base = order_base;
        self
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}
