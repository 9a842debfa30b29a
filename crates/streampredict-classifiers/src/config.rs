//! Serializable model configuration (for YAML config files)

use crate::{DeviceType, ModelConfig, ModelFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model configuration specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfigSpec {
    /// Path to the model artifact
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// Artifact format; inferred from the extension when omitted
    #[serde(default)]
    pub format: Option<ModelFormatSpec>,

    /// Inference device
    #[serde(default)]
    pub device: DeviceSpec,
}

/// Model format specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormatSpec {
    Forest,
    Linear,
}

/// Device specification (for config files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSpec {
    #[default]
    Cpu,
    Cuda { index: Option<usize> },
    Metal { index: Option<usize> },
}

impl Default for ModelConfigSpec {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            format: None,
            device: DeviceSpec::Cpu,
        }
    }
}

impl From<ModelFormatSpec> for ModelFormat {
    fn from(spec: ModelFormatSpec) -> Self {
        match spec {
            ModelFormatSpec::Forest => Self::Forest,
            ModelFormatSpec::Linear => Self::Linear,
        }
    }
}

impl From<ModelFormat> for ModelFormatSpec {
    fn from(format: ModelFormat) -> Self {
        match format {
            ModelFormat::Forest => Self::Forest,
            ModelFormat::Linear => Self::Linear,
        }
    }
}

impl From<DeviceSpec> for DeviceType {
    fn from(spec: DeviceSpec) -> Self {
        match spec {
            DeviceSpec::Cpu => Self::Cpu,
            DeviceSpec::Cuda { index } => Self::Cuda(index.unwrap_or(0)),
            DeviceSpec::Metal { index } => Self::Metal(index.unwrap_or(0)),
        }
    }
}

impl ModelConfigSpec {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Convert to ModelConfig for loading
    pub fn to_model_config(&self) -> ModelConfig {
        ModelConfig {
            path: self.path.clone(),
            format: self.format.map(Into::into),
            device: self.device.into(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(crate::model_loader::DEFAULT_MODEL_PATH)
}
