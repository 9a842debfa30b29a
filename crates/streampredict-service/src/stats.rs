//! Per-process prediction counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use streampredict_core::StreamLabel;

/// Prediction counters shared by clones of a predictor
#[derive(Clone, Default)]
pub struct PredictionStats {
    inner: Arc<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    science: AtomicU64,
    commerce: AtomicU64,
    arts: AtomicU64,
    unknown: AtomicU64,
    errors: AtomicU64,
    inference_latency_us: AtomicU64,
}

impl PredictionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, label: StreamLabel, latency_us: u64) {
        let counter = match label {
            StreamLabel::Science => &self.inner.science,
            StreamLabel::Commerce => &self.inner.commerce,
            StreamLabel::Arts => &self.inner.arts,
            StreamLabel::Unknown => &self.inner.unknown,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.inner
            .inference_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
    }

    /// Record a failed request
    pub fn record_error(&self) {
        self.inner.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            science: self.inner.science.load(Ordering::Relaxed),
            commerce: self.inner.commerce.load(Ordering::Relaxed),
            arts: self.inner.arts.load(Ordering::Relaxed),
            unknown: self.inner.unknown.load(Ordering::Relaxed),
            errors: self.inner.errors.load(Ordering::Relaxed),
            inference_latency_us: self.inner.inference_latency_us.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of prediction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub science: u64,
    pub commerce: u64,
    pub arts: u64,
    pub unknown: u64,
    pub errors: u64,
    pub inference_latency_us: u64,
}

impl StatsSnapshot {
    /// Successful predictions across all labels
    pub fn predictions(&self) -> u64 {
        self.science + self.commerce + self.arts + self.unknown
    }

    /// All handled requests
    pub fn total(&self) -> u64 {
        self.predictions() + self.errors
    }

    /// Average inference latency per successful prediction
    pub fn avg_latency_us(&self) -> u64 {
        match self.predictions() {
            0 => 0,
            n => self.inference_latency_us / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_label() {
        let stats = PredictionStats::new();
        stats.record_prediction(StreamLabel::Science, 10);
        stats.record_prediction(StreamLabel::Science, 30);
        stats.record_prediction(StreamLabel::Unknown, 20);
        stats.record_error();

        let snap = stats.snapshot();
        assert_eq!(snap.science, 2);
        assert_eq!(snap.unknown, 1);
        assert_eq!(snap.errors, 1);
        assert_eq!(snap.predictions(), 3);
        assert_eq!(snap.total(), 4);
        assert_eq!(snap.avg_latency_us(), 20);
    }

    #[test]
    fn test_clones_share_counters() {
        let stats = PredictionStats::new();
        let clone = stats.clone();
        clone.record_prediction(StreamLabel::Arts, 0);
        assert_eq!(stats.snapshot().arts, 1);
    }
}
