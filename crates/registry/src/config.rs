use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const REGISTRY_CONFIG_SCHEMA_VERSION: u32 = 1;

const MAX_KEY_LEN_LIMIT: usize = 4096;

/// What the store does when a second fragment arrives for a key it already holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Append silently.
    #[default]
    Append,
    /// Append, and log a warning naming the key.
    Warn,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Upper bound on key length in bytes. Unbounded unless configured.
    #[serde(default)]
    pub max_key_len: Option<usize>,
}

fn default_schema_version() -> u32 {
    REGISTRY_CONFIG_SCHEMA_VERSION
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            schema_version: REGISTRY_CONFIG_SCHEMA_VERSION,
            duplicate_keys: DuplicateKeyPolicy::default(),
            max_key_len: None,
        }
    }
}

impl RegistryConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != REGISTRY_CONFIG_SCHEMA_VERSION {
            return Err(RegistryError::Config(format!(
                "Unsupported registry config schema_version {} (expected {REGISTRY_CONFIG_SCHEMA_VERSION})",
                self.schema_version
            )));
        }

        if let Some(max_key_len) = self.max_key_len {
            if !(1..=MAX_KEY_LEN_LIMIT).contains(&max_key_len) {
                return Err(RegistryError::Config(format!(
                    "max_key_len must be in [1, {MAX_KEY_LEN_LIMIT}] (got {max_key_len})"
                )));
            }
        }

        Ok(())
    }
}
