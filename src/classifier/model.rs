use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use ndarray::Array1;

use super::error::ClassifierError;
use super::utils::{euclidean_distance, rms_distance};
use crate::store::SampleStore;
use crate::Descriptor;

/// Outcome of one classification call.
///
/// `label: None` means no class cleared the engine's acceptance rule; it is
/// distinct from [`ClassifierError::Untrained`], which means there was no
/// training data to match against at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Option<String>,
    /// Distance to the winning sample or centroid; engine-specific scale,
    /// never comparable across engines
    pub distance: Option<f32>,
    /// `1 - normalized distance` where the engine defines one
    pub confidence: Option<f32>,
}

impl Prediction {
    pub fn none() -> Self {
        Self {
            label: None,
            distance: None,
            confidence: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.label.is_some()
    }
}

/// Matching engines selectable at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Exact nearest neighbor over every stored sample; preferred when
    /// per-sample data is available
    NearestNeighbor,
    /// Per-class mean descriptor with a fixed acceptance threshold;
    /// fallback when the per-sample index is unavailable
    NearestCentroid,
}

pub(crate) trait MatchStrategy: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;
    fn match_threshold(&self) -> Option<f32>;
    fn classify(&self, store: &SampleStore, input: &Array1<f32>) -> Prediction;
}

#[derive(Debug)]
pub(crate) struct NearestNeighbor;

impl MatchStrategy for NearestNeighbor {
    fn name(&self) -> &'static str {
        "nearest-neighbor"
    }

    fn match_threshold(&self) -> Option<f32> {
        None
    }

    fn classify(&self, store: &SampleStore, input: &Array1<f32>) -> Prediction {
        let mut best_label: Option<&str> = None;
        let mut best_distance = f32::INFINITY;

        // Strict `<` keeps ties on the first-encountered sample; the store
        // iterates classes and samples in insertion order.
        for class in store.classes() {
            for sample in class.samples() {
                let distance = euclidean_distance(input, sample);
                if distance < best_distance {
                    best_distance = distance;
                    best_label = Some(class.label());
                }
            }
        }

        match best_label {
            Some(label) => Prediction {
                label: Some(label.to_string()),
                distance: Some(best_distance),
                confidence: None,
            },
            None => Prediction::none(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct NearestCentroid {
    pub threshold: f32,
}

impl MatchStrategy for NearestCentroid {
    fn name(&self) -> &'static str {
        "nearest-centroid"
    }

    fn match_threshold(&self) -> Option<f32> {
        Some(self.threshold)
    }

    fn classify(&self, store: &SampleStore, input: &Array1<f32>) -> Prediction {
        let mut best_label: Option<&str> = None;
        let mut best_distance = f32::INFINITY;

        for class in store.classes() {
            // Class means are computed lazily from the running sums.
            let Some(mean) = class.mean() else { continue };
            let distance = rms_distance(input, &mean);
            if distance < best_distance {
                best_distance = distance;
                best_label = Some(class.label());
            }
        }

        match best_label {
            Some(label) if best_distance < self.threshold => Prediction {
                label: Some(label.to_string()),
                distance: Some(best_distance),
                confidence: Some(1.0 - best_distance),
            },
            Some(label) => {
                debug!(
                    "centroid match '{}' rejected: distance {:.4} >= threshold {:.4}",
                    label, best_distance, self.threshold
                );
                Prediction::none()
            }
            None => Prediction::none(),
        }
    }
}

/// A gesture classifier matching encoded hand poses against a
/// [`SampleStore`], with the engine chosen at construction time.
///
/// At most one classification is allowed in flight; a call arriving while
/// another is pending is dropped with [`ClassifierError::Busy`], never
/// queued, so a stalled engine cannot back up the frame pipeline.
#[derive(Debug)]
pub struct Classifier {
    pub(crate) descriptor: Descriptor,
    pub(crate) strategy: Box<dyn MatchStrategy>,
    in_flight: AtomicBool,
}

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    pub(crate) fn new(descriptor: Descriptor, strategy: Box<dyn MatchStrategy>) -> Self {
        Self {
            descriptor,
            strategy,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    /// Returns information about the classifier's configuration
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            descriptor: self.descriptor,
            engine: self.strategy.name(),
            feature_len: self.descriptor.characteristics().feature_len,
            match_threshold: self.strategy.match_threshold(),
        }
    }

    /// Matches an encoded pose against the store's classes.
    ///
    /// Returns [`ClassifierError::Untrained`] when no class has samples and
    /// [`ClassifierError::Busy`] when another call is still in flight.
    pub fn classify(
        &self,
        store: &SampleStore,
        input: &Array1<f32>,
    ) -> Result<Prediction, ClassifierError> {
        let expected = self.descriptor.characteristics().feature_len;
        if input.len() != expected {
            return Err(ClassifierError::ValidationError(format!(
                "input vector has {} entries, expected {}",
                input.len(),
                expected
            )));
        }
        if !store.is_trained() {
            return Err(ClassifierError::Untrained);
        }

        if self.in_flight.swap(true, Ordering::Acquire) {
            return Err(ClassifierError::Busy);
        }
        let prediction = self.strategy.classify(store, input);
        self.in_flight.store(false, Ordering::Release);

        debug!(
            "classified via {}: label={:?} distance={:?}",
            self.strategy.name(),
            prediction.label,
            prediction.distance
        );
        Ok(prediction)
    }

    /// Marks or clears the in-flight slot directly. Hosts driving an
    /// external async engine use this to extend the single-flight window
    /// across a suspension.
    pub fn set_in_flight(&self, busy: bool) -> bool {
        self.in_flight.swap(busy, Ordering::AcqRel)
    }
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};
