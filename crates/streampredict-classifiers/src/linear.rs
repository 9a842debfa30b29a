//! Multinomial logistic regression loaded from SafeTensors and run with Candle
//!
//! Expected tensors: `weight` with shape `[num_classes, num_features]`,
//! `bias` with shape `[num_classes]`, and optionally `classes` (i64,
//! `[num_classes]`) giving the class value for each output row.

use crate::classifier::{argmax, ensure_finite, Classification, ModelMetadata, StreamClassifier};
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{Linear, Module};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use streampredict_core::{Error, FeatureVector, Result};
use tracing::debug;

/// Linear softmax classifier
pub struct LinearClassifier {
    name: String,
    layer: Linear,
    device: Device,
    classes: Vec<i64>,
    num_features: usize,
}

impl LinearClassifier {
    /// Build from weight/bias tensors already on `device`
    pub fn new(
        name: impl Into<String>,
        weight: Tensor,
        bias: Tensor,
        classes: Option<Vec<i64>>,
        device: Device,
    ) -> Result<Self> {
        let (num_classes, num_features) = weight.dims2().map_err(|e| {
            Error::model_unavailable(format!("weight must be a 2-D tensor: {}", e))
        })?;
        let bias_len = bias
            .dims1()
            .map_err(|e| Error::model_unavailable(format!("bias must be a 1-D tensor: {}", e)))?;
        if bias_len != num_classes {
            return Err(Error::model_unavailable(format!(
                "bias has {} entries but weight has {} rows",
                bias_len, num_classes
            )));
        }

        let classes = classes.unwrap_or_else(|| (0..num_classes as i64).collect());
        if classes.len() != num_classes {
            return Err(Error::model_unavailable(format!(
                "classes has {} entries but weight has {} rows",
                classes.len(),
                num_classes
            )));
        }

        let weight = weight
            .to_dtype(DType::F32)
            .map_err(|e| Error::model_unavailable(format!("failed to convert weight: {}", e)))?;
        let bias = bias
            .to_dtype(DType::F32)
            .map_err(|e| Error::model_unavailable(format!("failed to convert bias: {}", e)))?;

        for (label, tensor) in [("weight", &weight), ("bias", &bias)] {
            let values = tensor
                .flatten_all()
                .and_then(|t| t.to_vec1::<f32>())
                .map_err(|e| Error::model_unavailable(format!("failed to read {}: {}", label, e)))?;
            if !values.iter().all(|v| v.is_finite()) {
                return Err(Error::model_unavailable(format!(
                    "{} contains non-finite values",
                    label
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            layer: Linear::new(weight, Some(bias)),
            device,
            classes,
            num_features,
        })
    }

    /// Load weights from a SafeTensors file
    pub fn from_file(path: impl AsRef<Path>, device: Device) -> Result<Self> {
        let path = path.as_ref();
        let mut tensors: HashMap<String, Tensor> = candle_core::safetensors::load(path, &device)
            .map_err(|e| {
                Error::model_unavailable(format!("failed to load {}: {}", path.display(), e))
            })?;

        let weight = tensors
            .remove("weight")
            .ok_or_else(|| Error::model_unavailable("missing tensor 'weight'"))?;
        let bias = tensors
            .remove("bias")
            .ok_or_else(|| Error::model_unavailable("missing tensor 'bias'"))?;
        let classes = tensors
            .remove("classes")
            .map(|t| {
                t.to_dtype(DType::I64)
                    .and_then(|t| t.to_vec1::<i64>())
                    .map_err(|e| Error::model_unavailable(format!("invalid 'classes' tensor: {}", e)))
            })
            .transpose()?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("linear")
            .to_string();

        Self::new(name, weight, bias, classes, device)
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    fn forward(&self, features: &FeatureVector) -> candle_core::Result<Vec<f32>> {
        let values = features.as_slice();
        let input = Tensor::from_slice(values, (1, values.len()), &self.device)?;
        let logits = self.layer.forward(&input)?;
        candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_vec1::<f32>()
    }
}

impl StreamClassifier for LinearClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Classification> {
        let start = Instant::now();
        ensure_finite(features)?;

        let probabilities = self
            .forward(features)
            .map_err(|e| Error::inference(format!("linear forward pass failed: {}", e)))?;
        if !probabilities.iter().all(|p| p.is_finite()) {
            return Err(Error::inference(
                "linear forward pass produced non-finite probabilities",
            ));
        }
        let best = argmax(&probabilities)
            .ok_or_else(|| Error::inference("model produced no class scores"))?;
        let class_index = self.classes[best];

        debug!(model = %self.name, class_index, "linear classification");

        Ok(Classification {
            class_index,
            probabilities: Some(probabilities),
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> ModelMetadata {
        let mut metadata = ModelMetadata::new(&self.name, "linear");
        metadata.classes = self.classes.clone();
        metadata.num_features = Some(self.num_features);
        metadata
            .extra
            .push(("device".to_string(), format!("{:?}", self.device)));
        metadata
    }
}
