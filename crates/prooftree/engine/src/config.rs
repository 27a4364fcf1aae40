//! Engine configuration

use crate::error::EngineError;
use crate::validation::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits and switches applied by [`crate::ConsistencyEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest allowed node id (number of components)
    pub max_depth: usize,

    /// Open challenges allowed against one node
    pub max_challenges_per_node: usize,

    /// Refinements allowed per node
    pub max_refinements: usize,

    /// Treat discharges without an open assumption as violations
    pub strict_scope_balance: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_challenges_per_node: 10,
            max_refinements: 10,
            strict_scope_balance: false,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            toml::from_str(contents).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file. No path, or a path that does not exist,
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        match path {
            Some(p) if p.exists() => {
                let contents = std::fs::read_to_string(p)
                    .map_err(|e| EngineError::Config(format!("{}: {}", p.display(), e)))?;
                Self::from_toml_str(&contents)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        toml::to_string(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.max_depth == 0 {
            return Err(EngineError::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}
