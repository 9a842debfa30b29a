//! The stream predictor service

use crate::config::ServiceConfig;
use crate::stats::PredictionStats;
use std::sync::Arc;
use streampredict_classifiers::{load_model, StreamClassifier};
use streampredict_core::{
    Error, FeatureVector, PredictionOutcome, PredictionRequest, PredictionResponse, RangeCheck,
    Result, StreamLabel,
};
use tracing::{debug, warn};

/// Maps feature vectors to stream recommendations using an injected model.
///
/// The model is read-only after load; clones share it and the counters.
#[derive(Clone)]
pub struct StreamPredictor {
    model: Arc<dyn StreamClassifier>,
    range_check: RangeCheck,
    stats: PredictionStats,
}

impl StreamPredictor {
    /// Create a predictor around an already-loaded model
    pub fn new(model: Arc<dyn StreamClassifier>) -> Self {
        Self {
            model,
            range_check: RangeCheck::Enforce,
            stats: PredictionStats::new(),
        }
    }

    /// Load the configured model and build a predictor.
    ///
    /// Fails with `Error::ModelUnavailable` before any request can be served.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let model = load_model(&config.model_config())?;
        Ok(Self::new(model).with_range_check(config.range_check()))
    }

    /// Set how request values are checked
    pub fn with_range_check(mut self, range_check: RangeCheck) -> Self {
        self.range_check = range_check;
        self
    }

    pub fn model(&self) -> &Arc<dyn StreamClassifier> {
        &self.model
    }

    pub fn stats(&self) -> &PredictionStats {
        &self.stats
    }

    /// Predict the stream label for a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<StreamLabel> {
        self.predict_outcome(features).map(|outcome| outcome.stream_label)
    }

    /// Predict and attach career suggestions and model confidence
    pub fn predict_outcome(&self, features: &FeatureVector) -> Result<PredictionOutcome> {
        let classification = match self.model.classify(features) {
            Ok(c) => c,
            Err(e) => {
                self.record_error(&e);
                return Err(e);
            }
        };

        let label = StreamLabel::from_class_index(classification.class_index);
        if !label.is_known() {
            warn!(
                model = %self.model.name(),
                class_index = classification.class_index,
                "Classifier returned an unmapped class index"
            );
        }

        debug!(
            stream = %label,
            class_index = classification.class_index,
            latency_us = classification.latency_us,
            "Prediction complete"
        );

        self.stats.record_prediction(label, classification.latency_us);
        metrics::counter!("streampredict_predictions_total", "stream" => label.as_str())
            .increment(1);
        metrics::histogram!("streampredict_inference_latency_us")
            .record(classification.latency_us as f64);

        Ok(PredictionOutcome::new(label).with_confidence(classification.confidence()))
    }

    /// Validate a request, predict, and fold any failure into the response
    pub fn handle(&self, request: &PredictionRequest) -> PredictionResponse {
        let outcome = request
            .to_feature_vector(self.range_check)
            .map_err(|e| {
                self.record_error(&e);
                e
            })
            .and_then(|features| self.predict_outcome(&features));

        match outcome {
            Ok(outcome) => PredictionResponse::Prediction(outcome),
            Err(e) => {
                warn!("Prediction request failed: {}", e);
                PredictionResponse::error(&e)
            }
        }
    }

    /// Handle one JSON-encoded request
    pub fn handle_json(&self, line: &str) -> PredictionResponse {
        match serde_json::from_str::<PredictionRequest>(line) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                let err = Error::invalid_input(format!("malformed request: {}", e));
                self.record_error(&err);
                warn!("{}", err);
                PredictionResponse::error(&err)
            }
        }
    }

    /// Handle one raw request line, rejecting bytes that are not UTF-8
    pub fn handle_bytes(&self, line: &[u8]) -> PredictionResponse {
        match std::str::from_utf8(line) {
            Ok(line) => self.handle_json(line.trim()),
            Err(e) => {
                let err = Error::invalid_input(format!("request is not valid UTF-8: {}", e));
                self.record_error(&err);
                warn!("{}", err);
                PredictionResponse::error(&err)
            }
        }
    }

    fn record_error(&self, err: &Error) {
        self.stats.record_error();
        metrics::counter!("streampredict_errors_total", "kind" => err.kind()).increment(1);
    }
}

impl std::fmt::Debug for StreamPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamPredictor")
            .field("model", &self.model.name())
            .field("range_check", &self.range_check)
            .finish()
    }
}
