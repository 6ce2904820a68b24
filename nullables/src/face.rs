//! Nullable face matcher: scripted detections and comparisons.

use async_trait::async_trait;
use soulbound_facematch::{Comparison, Detection, FaceMatchError, FaceMatcher};
use soulbound_types::{Confidence, Photo};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A face matcher that answers from queues.
///
/// Queued results are returned in order; once a queue is empty every
/// detection finds one face and every comparison reports the default
/// confidence. Call counts are recorded for assertions.
pub struct NullFaceMatcher {
    detections: Mutex<VecDeque<Result<Detection, FaceMatchError>>>,
    comparisons: Mutex<VecDeque<Result<Comparison, FaceMatchError>>>,
    default_confidence: f64,
    mock: bool,
    detect_calls: AtomicUsize,
    compare_calls: AtomicUsize,
}

impl NullFaceMatcher {
    /// Every comparison scores `confidence`.
    pub fn with_confidence(confidence: f64) -> Self {
        Self {
            detections: Mutex::new(VecDeque::new()),
            comparisons: Mutex::new(VecDeque::new()),
            default_confidence: confidence,
            mock: false,
            detect_calls: AtomicUsize::new(0),
            compare_calls: AtomicUsize::new(0),
        }
    }

    /// Flag every default result as synthetic.
    pub fn mock_results(mut self) -> Self {
        self.mock = true;
        self
    }

    pub fn push_detection(&self, result: Result<Detection, FaceMatchError>) {
        self.detections.lock().unwrap().push_back(result);
    }

    /// Queue a detection that finds no face.
    pub fn push_no_face(&self) {
        self.push_detection(Ok(Detection {
            face_tokens: Vec::new(),
            mock: false,
        }));
    }

    pub fn push_comparison(&self, result: Result<Comparison, FaceMatchError>) {
        self.comparisons.lock().unwrap().push_back(result);
    }

    /// Queue a real (non-mock) comparison with the given score.
    pub fn push_confidence(&self, confidence: f64) {
        let confidence = Confidence::new(confidence).unwrap_or(Confidence::ZERO);
        self.push_comparison(Ok(Comparison::new(confidence, None, false)));
    }

    pub fn detect_calls(&self) -> usize {
        self.detect_calls.load(Ordering::SeqCst)
    }

    pub fn compare_calls(&self) -> usize {
        self.compare_calls.load(Ordering::SeqCst)
    }

    /// Total calls of either kind.
    pub fn calls(&self) -> usize {
        self.detect_calls() + self.compare_calls()
    }
}

impl Default for NullFaceMatcher {
    fn default() -> Self {
        Self::with_confidence(95.0)
    }
}

#[async_trait]
impl FaceMatcher for NullFaceMatcher {
    async fn detect_face(&self, _image: &Photo) -> Result<Detection, FaceMatchError> {
        self.detect_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.detections.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| {
            Ok(Detection {
                face_tokens: vec!["null_face".to_string()],
                mock: self.mock,
            })
        })
    }

    async fn compare_faces(&self, _a: &Photo, _b: &Photo) -> Result<Comparison, FaceMatchError> {
        self.compare_calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.comparisons.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| {
            let confidence =
                Confidence::new(self.default_confidence).unwrap_or(Confidence::ZERO);
            Ok(Comparison::new(confidence, None, self.mock))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> Photo {
        Photo::from_bytes("image/jpeg", b"face")
    }

    #[tokio::test]
    async fn queued_results_come_first() {
        let matcher = NullFaceMatcher::with_confidence(90.0);
        matcher.push_confidence(42.0);

        let first = matcher.compare_faces(&photo(), &photo()).await.unwrap();
        let second = matcher.compare_faces(&photo(), &photo()).await.unwrap();
        assert_eq!(first.confidence.value(), 42.0);
        assert!(!first.verified);
        assert_eq!(second.confidence.value(), 90.0);
        assert_eq!(matcher.compare_calls(), 2);
    }

    #[tokio::test]
    async fn no_face_then_default_face() {
        let matcher = NullFaceMatcher::default();
        matcher.push_no_face();
        assert!(!matcher.detect_face(&photo()).await.unwrap().face_found());
        assert!(matcher.detect_face(&photo()).await.unwrap().face_found());
        assert_eq!(matcher.detect_calls(), 2);
    }
}
