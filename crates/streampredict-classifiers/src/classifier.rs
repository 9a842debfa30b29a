//! Classifier trait and common types

use streampredict_core::{FeatureVector, Result};

/// Trait for anything that can classify a feature vector into a class index.
///
/// Implementations must be reentrant: a loaded model is shared read-only.
pub trait StreamClassifier: Send + Sync {
    /// Classify the given feature vector
    fn classify(&self, features: &FeatureVector) -> Result<Classification>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Describe the loaded model
    fn metadata(&self) -> ModelMetadata {
        ModelMetadata::new(self.name(), "custom")
    }
}

/// Result of classification
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Raw class index as produced by the model
    pub class_index: i64,

    /// Per-class probabilities, aligned with the model's class list
    pub probabilities: Option<Vec<f32>>,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl Classification {
    /// Create a classification carrying only a class index
    pub fn new(class_index: i64) -> Self {
        Self {
            class_index,
            probabilities: None,
            latency_us: 0,
        }
    }

    /// Attach class probabilities
    pub fn with_probabilities(mut self, probabilities: Vec<f32>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    /// Highest class probability, if the model reported probabilities
    pub fn confidence(&self) -> Option<f32> {
        self.probabilities
            .as_ref()?
            .iter()
            .copied()
            .fold(None, |best, p| match best {
                Some(b) if b >= p => Some(b),
                _ => Some(p),
            })
    }
}

/// Metadata about a loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetadata {
    /// Model name/identifier
    pub name: String,

    /// Artifact format
    pub format: String,

    /// Class values the model can emit, in probability order
    pub classes: Vec<i64>,

    /// Number of input features the model was built for
    pub num_features: Option<usize>,

    /// Additional key-value pairs
    pub extra: Vec<(String, String)>,
}

impl ModelMetadata {
    pub fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            classes: Vec::new(),
            num_features: None,
            extra: Vec::new(),
        }
    }
}

/// Index of the largest value; ties resolve to the first occurrence
pub(crate) fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if b >= v => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Reject NaN and infinite inputs before they reach a model
pub(crate) fn ensure_finite(features: &FeatureVector) -> Result<()> {
    if let Some(pos) = features.as_slice().iter().position(|v| !v.is_finite()) {
        return Err(streampredict_core::Error::inference(format!(
            "feature {} is not a finite number",
            pos
        )));
    }
    Ok(())
}
