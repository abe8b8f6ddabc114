pub mod pose;
pub mod classifier;
pub mod store;
pub mod gate;
pub mod buffer;
pub mod command;
pub mod config;
pub mod session;

pub use classifier::{Classifier, ClassifierError, Prediction};
pub use gate::{GateEvent, GateInput, StabilityGate};
pub use pose::{HandPose, Landmark};
pub use session::{FrameOutcome, Session};
pub use store::{SampleStore, StoreError, TrainingRecord};

/// Represents the available pose descriptor encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    /// Full 3-D encoding over all 21 landmarks
    ///
    /// Characteristics:
    /// - Feature length: 63 (21 landmarks x 3 coordinates)
    /// - Scale reference: middle fingertip (landmark 12)
    /// - Invariant to camera distance and resolution, not to hand rotation
    Spatial,
    /// Legacy 2-D encoding, depth discarded
    ///
    /// Characteristics:
    /// - Feature length: 42 (21 landmarks x 2 coordinates)
    /// - Scale reference: middle-finger MCP (landmark 9)
    Planar,
}

/// Characteristics of a descriptor encoding
#[derive(Debug, Clone)]
pub struct DescriptorCharacteristics {
    /// Length of the feature vectors produced by the encoding
    pub feature_len: usize,
    /// Landmark index used as the hand-size scale reference
    pub scale_landmark: usize,
    /// Whether the z coordinate participates in the encoding
    pub uses_depth: bool,
}

impl Descriptor {
    /// Get the characteristics of the descriptor
    pub fn characteristics(&self) -> DescriptorCharacteristics {
        match self {
            Self::Spatial => DescriptorCharacteristics {
                feature_len: 63,
                scale_landmark: pose::landmarks::MIDDLE_FINGER_TIP,
                uses_depth: true,
            },
            Self::Planar => DescriptorCharacteristics {
                feature_len: 42,
                scale_landmark: pose::landmarks::MIDDLE_FINGER_MCP,
                uses_depth: false,
            },
        }
    }
}

pub fn init_logger() {
    env_logger::init();
}
