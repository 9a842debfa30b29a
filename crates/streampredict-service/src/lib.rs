//! StreamPredict Service
//!
//! The stream predictor service: a loaded classifier plus the fixed class
//! table, exposed as a one-request-at-a-time prediction surface.

pub mod cli;
pub mod config;
pub mod predictor;
pub mod session;
pub mod stats;

pub use config::{ServiceConfig, ValidationConfig};
pub use predictor::StreamPredictor;
pub use session::{run_session, SessionSummary};
pub use stats::{PredictionStats, StatsSnapshot};
