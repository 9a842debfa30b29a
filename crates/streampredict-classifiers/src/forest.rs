//! Tree-ensemble classifier loaded from a JSON artifact
//!
//! The artifact stores each tree in flattened node-array form: node `i` is a
//! leaf when `children_left[i] == -1`, otherwise samples with
//! `x[feature[i]] <= threshold[i]` go left. `value[i]` holds the per-class
//! weights at that node. A single tree is a decision tree; several trees are
//! averaged like a random forest.

use crate::classifier::{argmax, ensure_finite, Classification, ModelMetadata, StreamClassifier};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use streampredict_core::{Error, FeatureVector, Result};
use tracing::debug;

const LEAF: i64 = -1;

/// One decision tree in flattened node-array form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f32>,
    pub value: Vec<Vec<f32>>,
}

impl DecisionTree {
    /// A single-leaf tree that always yields `weights`
    pub fn leaf(weights: Vec<f32>) -> Self {
        Self {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![LEAF],
            threshold: vec![0.0],
            value: vec![weights],
        }
    }

    /// A one-split tree: `x[feature] <= threshold` picks `left`, else `right`
    pub fn stump(feature: usize, threshold: f32, left: Vec<f32>, right: Vec<f32>) -> Self {
        let parent_weights = left.iter().zip(&right).map(|(l, r)| l + r).collect();
        Self {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![feature as i64, LEAF, LEAF],
            threshold: vec![threshold, 0.0, 0.0],
            value: vec![parent_weights, left, right],
        }
    }

    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, num_classes: usize) -> std::result::Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("node arrays have mismatched lengths".to_string());
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if (left == LEAF) != (right == LEAF) {
                return Err(format!("node {} has only one child", i));
            }
            if left != LEAF {
                // Children always follow their parent, which rules out cycles
                for child in [left, right] {
                    if child <= i as i64 || child >= n as i64 {
                        return Err(format!("node {} has invalid child {}", i, child));
                    }
                }
                if self.feature[i] < 0 {
                    return Err(format!("split node {} has negative feature index", i));
                }
            }
            if self.value[i].len() != num_classes {
                return Err(format!(
                    "node {} has {} class weights, expected {}",
                    i,
                    self.value[i].len(),
                    num_classes
                ));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its class weights
    fn leaf_weights(&self, features: &[f32]) -> Result<&[f32]> {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            let value = features.get(feature).ok_or_else(|| {
                Error::inference(format!(
                    "tree splits on feature {} but the vector has {} elements",
                    feature,
                    features.len()
                ))
            })?;
            node = if *value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Ok(&self.value[node])
    }
}

/// Serialized form of a tree-ensemble artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestArtifact {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    /// Number of input features the ensemble was trained on
    pub n_features: usize,

    /// Class values, aligned with each node's weight vector
    pub classes: Vec<i64>,

    pub trees: Vec<DecisionTree>,
}

fn default_name() -> String {
    "forest".to_string()
}

/// Decision tree / random forest classifier
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    artifact: ForestArtifact,
}

impl ForestClassifier {
    /// Build a classifier from an in-memory artifact, validating its structure
    pub fn new(artifact: ForestArtifact) -> Result<Self> {
        if artifact.classes.is_empty() {
            return Err(Error::model_unavailable("forest artifact lists no classes"));
        }
        if artifact.trees.is_empty() {
            return Err(Error::model_unavailable("forest artifact contains no trees"));
        }
        for (i, tree) in artifact.trees.iter().enumerate() {
            tree.validate(artifact.classes.len()).map_err(|e| {
                Error::model_unavailable(format!("tree {} is malformed: {}", i, e))
            })?;
        }
        Ok(Self { artifact })
    }

    /// Parse and validate a JSON artifact
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ForestArtifact = serde_json::from_str(json).map_err(|e| {
            Error::model_unavailable(format!("failed to parse forest artifact: {}", e))
        })?;
        Self::new(artifact)
    }

    /// Load a JSON artifact from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::model_unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn artifact(&self) -> &ForestArtifact {
        &self.artifact
    }

    /// Averaged, per-tree-normalized class probabilities
    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f32>> {
        let num_classes = self.artifact.classes.len();
        let mut totals = vec![0.0f32; num_classes];

        for tree in &self.artifact.trees {
            let weights = tree.leaf_weights(features)?;
            let sum: f32 = weights.iter().sum();
            if sum > 0.0 {
                for (total, w) in totals.iter_mut().zip(weights) {
                    *total += w / sum;
                }
            }
        }

        let n = self.artifact.trees.len() as f32;
        Ok(totals.into_iter().map(|t| t / n).collect())
    }
}

impl StreamClassifier for ForestClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Classification> {
        let start = Instant::now();
        ensure_finite(features)?;

        let values = features.as_slice();
        if values.len() != self.artifact.n_features {
            return Err(Error::inference(format!(
                "model expects {} features, got {}",
                self.artifact.n_features,
                values.len()
            )));
        }

        let probabilities = self.predict_proba(values)?;
        let best = argmax(&probabilities)
            .ok_or_else(|| Error::inference("model produced no class scores"))?;
        let class_index = self.artifact.classes[best];

        debug!(model = %self.artifact.name, class_index, "forest classification");

        Ok(Classification {
            class_index,
            probabilities: Some(probabilities),
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn metadata(&self) -> ModelMetadata {
        let mut metadata = ModelMetadata::new(&self.artifact.name, "forest");
        metadata.classes = self.artifact.classes.clone();
        metadata.num_features = Some(self.artifact.n_features);
        metadata
            .extra
            .push(("trees".to_string(), self.artifact.trees.len().to_string()));
        if let Some(version) = &self.artifact.version {
            metadata.extra.push(("version".to_string(), version.clone()));
        }
        metadata
    }
}
