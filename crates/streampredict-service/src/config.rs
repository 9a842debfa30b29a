//! Service configuration

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::path::Path;
use streampredict_classifiers::{ModelConfig, ModelConfigSpec};
use streampredict_core::{Error, RangeCheck, Result};

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Model artifact settings
    #[serde(default)]
    pub model: ModelConfigSpec,

    /// Request validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Request validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject marks outside 0-100 and ratings outside 1-5
    #[serde(default = "default_true")]
    pub enforce_ranges: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_ranges: true,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> Result<Self> {
        // A missing file means defaults; a present but invalid one is fatal
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.model.path = model.clone();
        }

        if let Some(format) = cli.format {
            config.model.format = Some(format.into());
        }

        if cli.no_range_check {
            config.validation.enforce_ranges = false;
        }

        Ok(config)
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("failed to parse service config: {}", e)))
    }

    pub fn model_config(&self) -> ModelConfig {
        self.model.to_model_config()
    }

    pub fn range_check(&self) -> RangeCheck {
        if self.validation.enforce_ranges {
            RangeCheck::Enforce
        } else {
            RangeCheck::Skip
        }
    }
}

fn default_true() -> bool {
    true
}
