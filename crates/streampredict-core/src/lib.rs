//! StreamPredict Core
//!
//! Core types shared across StreamPredict components.
//!
//! This crate provides:
//! - The fixed 13-position feature layout consumed by stream classifiers
//! - Stream labels and the career suggestion table
//! - Request/response types for the prediction surface
//! - Error types and result handling

pub mod error;
pub mod request;
pub mod types;

pub use error::{Error, Result};
pub use request::{
    ErrorDescriptor, PredictionOutcome, PredictionRequest, PredictionResponse, RangeCheck,
};
pub use types::{FeatureField, FeatureVector, StreamLabel, FEATURE_COUNT};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::request::{PredictionOutcome, PredictionRequest, PredictionResponse};
    pub use crate::types::{FeatureField, FeatureVector, StreamLabel, FEATURE_COUNT};
}
