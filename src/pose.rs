use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::Descriptor;

/// Hand landmark indices (MediaPipe hand landmark model convention)
#[allow(dead_code)]
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Number of landmarks in one detected hand
pub const LANDMARK_COUNT: usize = 21;

/// A single hand landmark with 3-D coordinates in detector-native units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One detected hand in one frame: all 21 landmarks
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Builds a pose from a detector-shaped slice of 21 (x, y, z) triples
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            return None;
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (lm, p) in landmarks.iter_mut().zip(points) {
            *lm = Landmark::new(p[0], p[1], p[2]);
        }
        Some(Self { landmarks })
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Encodes the pose into a device/scale/position-independent feature
    /// vector.
    ///
    /// Steps: translate so the wrist is the origin, divide by the distance
    /// from the wrist to the descriptor's scale landmark (1.0 substituted
    /// when that distance is exactly zero), then flatten landmark-major.
    /// Output length is always `descriptor.characteristics().feature_len`.
    ///
    /// The encoding is not invariant to in-plane hand rotation; training
    /// assumes a canonical orientation.
    pub fn encode(&self, descriptor: Descriptor) -> Array1<f32> {
        let ch = descriptor.characteristics();
        let wrist = self.landmarks[landmarks::WRIST];

        let translated: Vec<Landmark> = self
            .landmarks
            .iter()
            .map(|pt| Landmark::new(pt.x - wrist.x, pt.y - wrist.y, pt.z - wrist.z))
            .collect();

        let reference = translated[ch.scale_landmark];
        let hand_size = if ch.uses_depth {
            (reference.x * reference.x + reference.y * reference.y + reference.z * reference.z)
                .sqrt()
        } else {
            reference.x.hypot(reference.y)
        };
        // A degenerate pose collapses onto the wrist; avoid dividing by zero.
        let hand_size = if hand_size == 0.0 { 1.0 } else { hand_size };

        let mut features = Vec::with_capacity(ch.feature_len);
        for pt in &translated {
            features.push(pt.x / hand_size);
            features.push(pt.y / hand_size);
            if ch.uses_depth {
                features.push(pt.z / hand_size);
            }
        }

        debug_assert_eq!(features.len(), ch.feature_len);
        Array1::from_vec(features)
    }
}
