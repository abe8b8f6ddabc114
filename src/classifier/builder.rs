use log::info;

use super::error::ClassifierError;
use super::model::{Classifier, Engine, NearestCentroid, NearestNeighbor};
use crate::Descriptor;

/// Acceptance threshold for the centroid fallback engine, in
/// length-normalized distance units. Loose on purpose; the per-sample
/// engine does not use it.
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.35;

/// A builder for constructing a Classifier with a fluent interface.
///
/// # Example
/// ```
/// use handspell::classifier::{Classifier, Engine};
/// use handspell::Descriptor;
///
/// let classifier = Classifier::builder()
///     .with_descriptor(Descriptor::Spatial)
///     .with_engine(Engine::NearestNeighbor)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    descriptor: Descriptor,
    engine: Engine,
    match_threshold: f32,
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierBuilder {
    /// Creates a new ClassifierBuilder with the spatial descriptor and the
    /// per-sample nearest-neighbor engine, the preferred configuration
    pub fn new() -> Self {
        Self {
            descriptor: Descriptor::Spatial,
            engine: Engine::NearestNeighbor,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    /// Sets the pose descriptor the classifier expects inputs in
    pub fn with_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Selects the matching engine
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the acceptance threshold used by the centroid engine
    pub fn with_match_threshold(mut self, threshold: f32) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Builds the classifier, consuming the builder
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        if !self.match_threshold.is_finite() || self.match_threshold <= 0.0 {
            return Err(ClassifierError::BuildError(format!(
                "match threshold must be positive and finite, got {}",
                self.match_threshold
            )));
        }

        let strategy: Box<dyn super::model::MatchStrategy> = match self.engine {
            Engine::NearestNeighbor => Box::new(NearestNeighbor),
            Engine::NearestCentroid => Box::new(NearestCentroid {
                threshold: self.match_threshold,
            }),
        };

        let classifier = Classifier::new(self.descriptor, strategy);
        info!(
            "classifier built: engine={} feature_len={}",
            classifier.info().engine,
            classifier.info().feature_len
        );
        Ok(classifier)
    }
}
