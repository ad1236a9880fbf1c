//! Engine configuration, read from an optional TOML file.

use crate::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Tunables shared by the binder, exporter and merger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Segment separator of binding paths.
    pub path_separator: char,
    /// Data key the node identity is read from and exported to.
    pub uuid_key: String,
    /// Whether export writes each node's identity.
    pub export_identity: bool,
    /// Whether collection entries sharing a primary key collapse to the last one.
    pub deduplicate_collections: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path_separator: cfgbind_tree::DEFAULT_SEPARATOR,
            uuid_key: "uuid".to_string(),
            export_identity: true,
            deduplicate_collections: true,
        }
    }
}

impl EngineConfig {
    /// Parses a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> EngineResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    fn validate(&self) -> EngineResult<()> {
        if self.uuid_key.is_empty() {
            return Err(EngineError::Config("uuid_key must not be empty".into()));
        }
        if self.path_separator.is_whitespace() {
            return Err(EngineError::Config(
                "path_separator must not be whitespace".into(),
            ));
        }
        Ok(())
    }
}
