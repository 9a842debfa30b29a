//! Request-at-a-time JSON-lines session

use crate::predictor::StreamPredictor;
use std::io::{BufRead, Write};
use streampredict_core::Result;
use tracing::{debug, info};

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Non-blank lines read
    pub requests: u64,
    /// Requests that produced an error response
    pub failed: u64,
}

/// Read one request per line from `input` and write one response per line.
///
/// Blank lines are skipped. Request failures, including lines that are not
/// UTF-8, become error responses and the loop continues; only I/O errors on
/// the streams themselves end the session.
pub fn run_session<R: BufRead, W: Write>(
    predictor: &StreamPredictor,
    mut input: R,
    mut output: W,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.iter().all(|b| b.is_ascii_whitespace()) {
            continue;
        }

        summary.requests += 1;
        let response = predictor.handle_bytes(&buf);
        if response.is_error() {
            summary.failed += 1;
        }
        debug!(request = summary.requests, error = response.is_error(), "Handled request");

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    info!(
        requests = summary.requests,
        failed = summary.failed,
        "Session finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use streampredict_classifiers::{Classification, StreamClassifier};
    use streampredict_core::{Error, FeatureField, FeatureVector, PredictionResponse, StreamLabel};

    /// Arts when interest in arts is high, science otherwise; fails on maths == 13
    struct InterestClassifier;

    impl StreamClassifier for InterestClassifier {
        fn classify(&self, features: &FeatureVector) -> streampredict_core::Result<Classification> {
            if features.get(FeatureField::Maths) == 13.0 {
                return Err(Error::inference("unlucky input"));
            }
            let class = if features.get(FeatureField::InterestArts) >= 4.0 {
                2
            } else {
                0
            };
            Ok(Classification::new(class))
        }

        fn name(&self) -> &str {
            "interest"
        }
    }

    fn run(input: &str) -> (SessionSummary, Vec<PredictionResponse>) {
        let predictor = StreamPredictor::new(Arc::new(InterestClassifier));
        let mut out = Vec::new();
        let summary = run_session(&predictor, input.as_bytes(), &mut out).unwrap();
        let responses = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, responses)
    }

    #[test]
    fn test_one_response_per_request() {
        let input = "{\"interest_arts\": 5}\n\n{\"maths\": 95}\n";
        let (summary, responses) = run(input);
        assert_eq!(summary, SessionSummary { requests: 2, failed: 0 });
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].stream_label(), Some(StreamLabel::Arts));
        assert_eq!(responses[1].stream_label(), Some(StreamLabel::Science));
    }

    #[test]
    fn test_failures_do_not_stop_the_session() {
        let input = "garbage\n{\"maths\": 13}\n{\"maths\": 500}\n{\"maths\": 80}\n";
        let (summary, responses) = run(input);
        assert_eq!(summary.requests, 4);
        assert_eq!(summary.failed, 3);
        assert!(responses[0].is_error());
        assert!(responses[1].is_error());
        assert!(responses[2].is_error());
        assert_eq!(responses[3].stream_label(), Some(StreamLabel::Science));
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_the_session() {
        let predictor = StreamPredictor::new(Arc::new(InterestClassifier));
        let mut input = b"{\"interest_arts\": 5}\n".to_vec();
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"maths\": 95}");

        let mut out = Vec::new();
        let summary = run_session(&predictor, input.as_slice(), &mut out).unwrap();
        assert_eq!(summary, SessionSummary { requests: 3, failed: 1 });

        let responses: Vec<PredictionResponse> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].stream_label(), Some(StreamLabel::Arts));
        let PredictionResponse::Error { error } = &responses[1] else {
            panic!("expected an error response");
        };
        assert_eq!(error.kind, "invalid_input");
        assert_eq!(responses[2].stream_label(), Some(StreamLabel::Science));
        assert_eq!(predictor.stats().snapshot().errors, 1);
    }

    #[test]
    fn test_empty_input() {
        let (summary, responses) = run("");
        assert_eq!(summary.requests, 0);
        assert!(responses.is_empty());
    }
}
