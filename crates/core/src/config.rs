//! Tunables for the semantic model.
//!
//! Loaded from a JSON file (path in `GROVE_CONFIG`) or built from defaults.
//! Every field is optional in the file.

use crate::coords::DEFAULT_MULTI_LINE_WEIGHT;
use crate::error::{GroveError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "GROVE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroveConfig {
    /// Weight of one line when comparing multi-line node sizes.
    pub multi_line_weight: i64,
    /// Nesting limit for recursive type inference (initializers, receivers).
    pub max_inference_depth: usize,
    /// Limit on superclass chain walks.
    pub max_hierarchy_depth: usize,
    /// Default strictness for workspace-level resolution queries.
    pub strict_resolution: bool,
    /// Log directory; defaults to `~/.grove/logs`.
    pub log_dir: Option<PathBuf>,
}

impl Default for GroveConfig {
    fn default() -> Self {
        Self {
            multi_line_weight: DEFAULT_MULTI_LINE_WEIGHT,
            max_inference_depth: 16,
            max_hierarchy_depth: 32,
            strict_resolution: true,
            log_dir: None,
        }
    }
}

impl GroveConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Loads the file named by `GROVE_CONFIG`, or returns defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.multi_line_weight <= 0 {
            return Err(GroveError::Config(format!(
                "multi_line_weight must be positive, got {}",
                self.multi_line_weight
            )));
        }
        if self.max_inference_depth == 0 {
            return Err(GroveError::Config(
                "max_inference_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".grove/logs")
        })
    }
}
