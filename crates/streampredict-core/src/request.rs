//! Request and response types for the prediction surface

use crate::error::{Error, Result};
use crate::types::{FeatureField, FeatureVector, StreamLabel, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Whether request values are checked against their field domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeCheck {
    /// Reject values outside marks 0-100 / ratings 1-5
    #[default]
    Enforce,
    /// Pass values through unchecked
    Skip,
}

/// A prediction request carrying the 13 named inputs.
///
/// Missing fields take the form defaults (70 for marks, 3 for ratings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionRequest {
    #[serde(default = "default_mark")]
    pub maths: i32,
    #[serde(default = "default_mark")]
    pub science: i32,
    #[serde(default = "default_mark")]
    pub english: i32,
    #[serde(default = "default_mark")]
    pub social_science: i32,
    #[serde(default = "default_mark")]
    pub language: i32,
    #[serde(default = "default_rating")]
    pub interest_maths: i32,
    #[serde(default = "default_rating")]
    pub interest_science: i32,
    #[serde(default = "default_rating")]
    pub interest_business: i32,
    #[serde(default = "default_rating")]
    pub interest_arts: i32,
    #[serde(default = "default_rating")]
    pub analytical: i32,
    #[serde(default = "default_rating")]
    pub creativity: i32,
    #[serde(default = "default_rating")]
    pub communication: i32,
    #[serde(default = "default_rating")]
    pub problem_solving: i32,
}

impl PredictionRequest {
    /// Build a request from values in vector order
    pub fn from_values(values: [i32; FEATURE_COUNT]) -> Self {
        let [
            maths,
            science,
            english,
            social_science,
            language,
            interest_maths,
            interest_science,
            interest_business,
            interest_arts,
            analytical,
            creativity,
            communication,
            problem_solving,
        ] = values;
        Self {
            maths,
            science,
            english,
            social_science,
            language,
            interest_maths,
            interest_science,
            interest_business,
            interest_arts,
            analytical,
            creativity,
            communication,
            problem_solving,
        }
    }

    /// Values in vector order
    pub fn values(&self) -> [i32; FEATURE_COUNT] {
        [
            self.maths,
            self.science,
            self.english,
            self.social_science,
            self.language,
            self.interest_maths,
            self.interest_science,
            self.interest_business,
            self.interest_arts,
            self.analytical,
            self.creativity,
            self.communication,
            self.problem_solving,
        ]
    }

    /// Check every field against its domain
    pub fn validate(&self) -> Result<()> {
        let violations: Vec<String> = FeatureField::ALL
            .iter()
            .zip(self.values())
            .filter(|(field, value)| {
                let range = field.range();
                !(i32::from(*range.start())..=i32::from(*range.end())).contains(value)
            })
            .map(|(field, value)| {
                let range = field.range();
                format!(
                    "{} = {} (expected {}-{})",
                    field,
                    value,
                    range.start(),
                    range.end()
                )
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "out of range: {}",
                violations.join(", ")
            )))
        }
    }

    /// Convert into a feature vector, optionally enforcing field domains
    pub fn to_feature_vector(&self, check: RangeCheck) -> Result<FeatureVector> {
        if check == RangeCheck::Enforce {
            self.validate()?;
        }
        // Exact for |v| <= 2^24, which covers both field domains
        Ok(FeatureVector::new(self.values().map(|v| v as f32)))
    }
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self::from_values(FeatureField::ALL.map(|f| i32::from(f.default_value())))
    }
}

fn default_mark() -> i32 {
    i32::from(FeatureField::Maths.default_value())
}

fn default_rating() -> i32 {
    i32::from(FeatureField::Analytical.default_value())
}

/// Successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub stream_label: StreamLabel,
    pub career_suggestions: Vec<String>,

    /// Model probability of the chosen class, when the model reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl PredictionOutcome {
    pub fn new(stream_label: StreamLabel) -> Self {
        Self {
            stream_label,
            career_suggestions: stream_label
                .career_suggestions()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: Option<f32>) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Error descriptor returned in place of a prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub kind: String,
    pub message: String,
}

impl From<&Error> for ErrorDescriptor {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Response to a single prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    Prediction(PredictionOutcome),
    Error { error: ErrorDescriptor },
}

impl PredictionResponse {
    pub fn error(err: &Error) -> Self {
        Self::Error { error: err.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Predicted label, if the request succeeded
    pub fn stream_label(&self) -> Option<StreamLabel> {
        match self {
            Self::Prediction(outcome) => Some(outcome.stream_label),
            Self::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_form_defaults() {
        let request: PredictionRequest = serde_json::from_str(r#"{"maths": 95}"#).unwrap();
        assert_eq!(request.maths, 95);
        assert_eq!(request.science, 70);
        assert_eq!(request.problem_solving, 3);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<PredictionRequest>(r#"{"physics": 95}"#).is_err());
    }

    #[test]
    fn test_values_in_vector_order() {
        let values = [90, 85, 80, 75, 70, 5, 5, 3, 2, 5, 3, 4, 3];
        let request = PredictionRequest::from_values(values);
        assert_eq!(request.values(), values);

        let vector = request.to_feature_vector(RangeCheck::Enforce).unwrap();
        assert_eq!(vector.get(FeatureField::InterestArts), 2.0);
        assert_eq!(vector.get(FeatureField::Communication), 4.0);
    }

    #[test]
    fn test_range_enforcement() {
        let request = PredictionRequest {
            maths: 101,
            creativity: 0,
            ..Default::default()
        };
        let err = request.to_feature_vector(RangeCheck::Enforce).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("maths = 101"));
        assert!(message.contains("creativity = 0"));
        assert_eq!(err.kind(), "invalid_input");

        let vector = request.to_feature_vector(RangeCheck::Skip).unwrap();
        assert_eq!(vector.get(FeatureField::Maths), 101.0);
    }

    #[test]
    fn test_boundary_marks_accepted() {
        let low = PredictionRequest::from_values([0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1]);
        let high = PredictionRequest::from_values([100, 100, 100, 100, 100, 5, 5, 5, 5, 5, 5, 5, 5]);
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_response_shapes() {
        let ok = PredictionResponse::Prediction(PredictionOutcome::new(StreamLabel::Commerce));
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["stream_label"], "COMMERCE");
        assert_eq!(json["career_suggestions"][0], "CA");
        assert!(json.get("confidence").is_none());

        let err = PredictionResponse::error(&Error::inference("shape mismatch"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"]["kind"], "inference");
        assert!(err.is_error());
        assert_eq!(err.stream_label(), None);
    }

    #[test]
    fn test_unknown_outcome_has_no_careers() {
        let outcome = PredictionOutcome::new(StreamLabel::Unknown);
        assert!(outcome.career_suggestions.is_empty());
    }
}
