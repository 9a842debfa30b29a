//! Tests against the bundled example artifact

use std::path::PathBuf;
use streampredict_classifiers::{load_model, ModelConfig, ModelFormat, StreamClassifier};
use streampredict_core::{FeatureVector, StreamLabel};

fn bundled_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/streampredict.json")
}

fn predict(values: [u8; 13]) -> StreamLabel {
    let model = load_model(&ModelConfig::from_local(bundled_model_path())).unwrap();
    let result = model.classify(&FeatureVector::from(values)).unwrap();
    StreamLabel::from_class_index(result.class_index)
}

#[test]
fn test_bundled_model_loads() {
    let config = ModelConfig::from_local(bundled_model_path());
    assert_eq!(config.resolve_format().unwrap(), ModelFormat::Forest);

    let model = load_model(&config).unwrap();
    let metadata = model.metadata();
    assert_eq!(metadata.format, "forest");
    assert_eq!(metadata.classes, vec![0, 1, 2]);
    assert_eq!(metadata.num_features, Some(13));
}

#[test]
fn test_strong_science_profile() {
    assert_eq!(
        predict([90, 85, 80, 75, 70, 5, 5, 3, 2, 5, 3, 4, 3]),
        StreamLabel::Science
    );
}

#[test]
fn test_commerce_profile() {
    assert_eq!(
        predict([60, 60, 70, 70, 70, 2, 2, 5, 2, 2, 3, 5, 3]),
        StreamLabel::Commerce
    );
}

#[test]
fn test_arts_profile() {
    assert_eq!(
        predict([55, 50, 85, 80, 90, 1, 1, 1, 5, 2, 5, 5, 3]),
        StreamLabel::Arts
    );
}

#[test]
fn test_classification_is_deterministic() {
    let model = load_model(&ModelConfig::from_local(bundled_model_path())).unwrap();
    let vector = FeatureVector::from([72, 64, 81, 77, 69, 3, 2, 4, 3, 3, 4, 4, 2]);
    let first = model.classify(&vector).unwrap();
    for _ in 0..10 {
        let again = model.classify(&vector).unwrap();
        assert_eq!(again.class_index, first.class_index);
        assert_eq!(again.probabilities, first.probabilities);
    }
}

#[test]
fn test_feature_order_is_load_bearing() {
    // Swapping maths and social science marks flips the first tree's vote
    let ordered = [55, 50, 85, 90, 90, 1, 1, 1, 3, 5, 5, 5, 3];
    let mut swapped = ordered;
    swapped.swap(0, 3);

    assert_eq!(predict(ordered), StreamLabel::Arts);
    assert_ne!(predict(swapped), predict(ordered));
}
