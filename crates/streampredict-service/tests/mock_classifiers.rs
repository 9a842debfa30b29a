//! Mock classifiers for testing
//!
//! Provides configurable stand-ins for a loaded model so the predictor's
//! mapping, error handling and statefulness can be tested without artifacts.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use streampredict_classifiers::{Classification, StreamClassifier};
use streampredict_core::{
    Error, FeatureField, FeatureVector, PredictionRequest, PredictionResponse, Result, StreamLabel,
};
use streampredict_service::StreamPredictor;

/// A mock classifier returning a configured class index
pub struct MockClassifier {
    class_index: i64,
    probabilities: Option<Vec<f32>>,
    call_count: AtomicU32,
}

impl MockClassifier {
    pub fn new(class_index: i64) -> Self {
        Self {
            class_index,
            probabilities: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Set the probabilities this classifier will report
    pub fn with_probabilities(mut self, probabilities: Vec<f32>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl StreamClassifier for MockClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<Classification> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let mut result = Classification::new(self.class_index);
        result.probabilities = self.probabilities.clone();
        Ok(result)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A classifier that always fails - for testing error paths
pub struct FailingClassifier {
    message: String,
}

impl FailingClassifier {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl StreamClassifier for FailingClassifier {
    fn classify(&self, _features: &FeatureVector) -> Result<Classification> {
        Err(Error::inference(self.message.clone()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Votes on whichever of the first two marks is larger, so order matters
pub struct OrderSensitiveClassifier;

impl StreamClassifier for OrderSensitiveClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Classification> {
        let class = if features.get(FeatureField::Maths) > features.get(FeatureField::Science) {
            0
        } else {
            2
        };
        Ok(Classification::new(class))
    }

    fn name(&self) -> &str {
        "order-sensitive"
    }
}

#[test]
fn test_scenario_science_with_engineer() {
    let mock = Arc::new(MockClassifier::new(0));
    let predictor = StreamPredictor::new(mock.clone());

    let request = PredictionRequest::from_values([90, 85, 80, 75, 70, 5, 5, 3, 2, 5, 3, 4, 3]);
    let response = predictor.handle(&request);

    let PredictionResponse::Prediction(outcome) = response else {
        panic!("expected prediction");
    };
    assert_eq!(outcome.stream_label, StreamLabel::Science);
    assert!(outcome.career_suggestions.contains(&"Engineer".to_string()));
    assert_eq!(mock.call_count(), 1);
}

#[test]
fn test_scenario_commerce_with_ca() {
    let predictor = StreamPredictor::new(Arc::new(MockClassifier::new(1)));
    let response = predictor.handle(&PredictionRequest::default());
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["stream_label"], "COMMERCE");
    assert!(json["career_suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c == "CA"));
}

#[test]
fn test_scenario_out_of_range_class_is_unknown() {
    let predictor = StreamPredictor::new(Arc::new(MockClassifier::new(5)));
    let response = predictor.handle(&PredictionRequest::default());
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["stream_label"], "Unknown");
    assert_eq!(json["career_suggestions"], serde_json::json!([]));
}

#[test]
fn test_confidence_reported_when_available() {
    let mock = MockClassifier::new(2).with_probabilities(vec![0.1, 0.15, 0.75]);
    let predictor = StreamPredictor::new(Arc::new(mock));
    let outcome = predictor.predict_outcome(&FeatureVector::default()).unwrap();
    assert_eq!(outcome.stream_label, StreamLabel::Arts);
    assert_eq!(outcome.confidence, Some(0.75));
}

#[test]
fn test_failure_then_recovery_with_shared_stats() {
    let failing = StreamPredictor::new(Arc::new(FailingClassifier::new("numeric error")));
    let err = failing.predict(&FeatureVector::default()).unwrap_err();
    assert!(matches!(err, Error::Inference(_)));
    assert!(!err.is_fatal());

    let response = failing.handle(&PredictionRequest::default());
    let PredictionResponse::Error { error } = response else {
        panic!("expected error response");
    };
    assert_eq!(error.kind, "inference");
    assert!(error.message.contains("numeric error"));
    assert_eq!(failing.stats().snapshot().errors, 2);
}

#[test]
fn test_invalid_request_never_reaches_model() {
    let mock = Arc::new(MockClassifier::new(0));
    let predictor = StreamPredictor::new(mock.clone());

    let request = PredictionRequest {
        interest_maths: 6,
        ..Default::default()
    };
    assert!(predictor.handle(&request).is_error());
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn test_ordering_is_load_bearing() {
    let predictor = StreamPredictor::new(Arc::new(OrderSensitiveClassifier));
    let values = [95, 40, 70, 70, 70, 3, 3, 3, 3, 3, 3, 3, 3];
    let mut swapped = values;
    swapped.swap(0, 1);

    let a = predictor.predict(&FeatureVector::from(values)).unwrap();
    let b = predictor.predict(&FeatureVector::from(swapped)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_predictor_clones_share_model() {
    let mock = Arc::new(MockClassifier::new(1));
    let predictor = StreamPredictor::new(mock.clone());
    let clone = predictor.clone();

    predictor.predict(&FeatureVector::default()).unwrap();
    clone.predict(&FeatureVector::default()).unwrap();

    assert_eq!(mock.call_count(), 2);
    assert_eq!(predictor.stats().snapshot().commerce, 2);
}
