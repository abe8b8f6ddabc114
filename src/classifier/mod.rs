mod error;
mod model;
pub mod builder;
mod utils;

pub use builder::ClassifierBuilder;
pub use error::ClassifierError;
pub use model::{Classifier, Engine, Prediction};

/// Information about the current configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Descriptor encoding the classifier expects inputs in
    pub descriptor: crate::Descriptor,
    /// Name of the active matching engine
    pub engine: &'static str,
    /// Length of the feature vectors the classifier compares
    pub feature_len: usize,
    /// Acceptance threshold, for engines that apply one
    pub match_threshold: Option<f32>,
}
