//! StreamPredict Classifiers
//!
//! Classifiers that map a 13-position student feature vector to a class index.
//!
//! Models are loaded once from a local artifact and are read-only afterwards:
//! - `forest`: JSON tree ensemble (single decision tree or random forest)
//! - `linear`: SafeTensors multinomial logistic regression, run with Candle
//!
//! Any type implementing [`StreamClassifier`] can stand in for a loaded model.

pub mod classifier;
pub mod config;
pub mod forest;
pub mod linear;
pub mod model_loader;

pub use classifier::{Classification, ModelMetadata, StreamClassifier};
pub use config::{DeviceSpec, ModelConfigSpec, ModelFormatSpec};
pub use forest::{DecisionTree, ForestClassifier};
pub use linear::LinearClassifier;
pub use model_loader::{load_model, DeviceType, ModelConfig, ModelFormat};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classification, StreamClassifier};
    pub use crate::model_loader::{load_model, ModelConfig, ModelFormat};
}
