//! Model artifact loading
//!
//! A model is loaded exactly once, before any request is accepted. Every
//! failure here is reported as `Error::ModelUnavailable`.

use crate::classifier::StreamClassifier;
use crate::forest::ForestClassifier;
use crate::linear::LinearClassifier;
use candle_core::Device;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use streampredict_core::{Error, Result};
use tracing::info;

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/streampredict.json";

/// Configuration for loading a stream model
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path to the model artifact
    pub path: PathBuf,

    /// Artifact format, inferred from the extension when unset
    pub format: Option<ModelFormat>,

    /// Device to run inference on (linear models only)
    pub device: DeviceType,
}

/// Device type for inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceType {
    /// CPU inference (always available)
    #[default]
    Cpu,
    /// CUDA GPU inference (if available)
    Cuda(usize),
    /// Metal (Apple Silicon)
    Metal(usize),
}

/// Model artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// JSON decision tree / random forest
    Forest,
    /// SafeTensors linear softmax model
    Linear,
}

impl ModelFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Forest),
            "safetensors" => Some(Self::Linear),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Linear => "linear",
        }
    }
}

impl std::str::FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forest" | "tree" | "json" => Ok(Self::Forest),
            "linear" | "safetensors" => Ok(Self::Linear),
            other => Err(format!("unknown model format '{}': expected forest or linear", other)),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
            format: None,
            device: DeviceType::Cpu,
        }
    }
}

impl ModelConfig {
    /// Create a new model configuration from a local path
    pub fn from_local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the artifact format explicitly
    pub fn with_format(mut self, format: ModelFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set device
    pub fn with_device(mut self, device: DeviceType) -> Self {
        self.device = device;
        self
    }

    /// Format to load with, explicit or inferred
    pub fn resolve_format(&self) -> Result<ModelFormat> {
        self.format
            .or_else(|| ModelFormat::from_path(&self.path))
            .ok_or_else(|| {
                Error::model_unavailable(format!(
                    "cannot infer model format from {}; set it explicitly",
                    self.path.display()
                ))
            })
    }
}

/// Load the configured model, failing fast if it cannot be used
///
/// Errors are returned without being logged.
pub fn load_model(config: &ModelConfig) -> Result<Arc<dyn StreamClassifier>> {
    let model = try_load(config)?;
    let metadata = model.metadata();
    info!(
        model = %metadata.name,
        format = %metadata.format,
        classes = ?metadata.classes,
        path = %config.path.display(),
        "Model loaded"
    );
    Ok(model)
}

fn try_load(config: &ModelConfig) -> Result<Arc<dyn StreamClassifier>> {
    if !config.path.exists() {
        return Err(Error::model_unavailable(format!(
            "model file not found: {}",
            config.path.display()
        )));
    }

    match config.resolve_format()? {
        ModelFormat::Forest => Ok(Arc::new(ForestClassifier::from_file(&config.path)?)),
        ModelFormat::Linear => {
            let device = create_device(config.device)?;
            Ok(Arc::new(LinearClassifier::from_file(&config.path, device)?))
        }
    }
}

/// Create Candle device from device type
fn create_device(device_type: DeviceType) -> Result<Device> {
    match device_type {
        DeviceType::Cpu => Ok(Device::Cpu),
        DeviceType::Cuda(idx) => Device::new_cuda(idx).map_err(|e| {
            Error::model_unavailable(format!("failed to create CUDA device: {}", e))
        }),
        DeviceType::Metal(idx) => Device::new_metal(idx).map_err(|e| {
            Error::model_unavailable(format!("failed to create Metal device: {}", e))
        }),
    }
}
