use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub mod cache;
pub mod remote;

pub use cache::TrainingCache;
pub use remote::RemoteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Cache error: {0}")]
    CacheError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Remote error: {0}")]
    RemoteError(#[from] reqwest::Error),
}

/// Training record as stored and sent over the wire:
/// `{ label, data: [f32; N], normalized }`.
///
/// The legacy gesture endpoint names the vector field `landmarks`; both
/// spellings deserialize into `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub label: String,
    #[serde(alias = "landmarks")]
    pub data: Vec<f32>,
    #[serde(default = "default_normalized")]
    pub normalized: bool,
}

fn default_normalized() -> bool {
    true
}

impl TrainingRecord {
    pub fn new(label: impl Into<String>, data: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            data,
            normalized: true,
        }
    }

    /// Validates the record against the store's fixed vector length.
    /// A failing record must not be persisted anywhere.
    pub fn validate(&self, expected_len: usize) -> Result<(), StoreError> {
        if self.label.trim().is_empty() {
            return Err(StoreError::ValidationError(
                "label cannot be empty".into(),
            ));
        }
        if self.data.len() != expected_len {
            return Err(StoreError::ValidationError(format!(
                "data must contain exactly {} values, got {}",
                expected_len,
                self.data.len()
            )));
        }
        if self.data.iter().any(|v| !v.is_finite()) {
            return Err(StoreError::ValidationError(
                "data contains non-finite values".into(),
            ));
        }
        Ok(())
    }
}

/// A label together with every feature vector captured for it.
///
/// Keeps a running sum alongside the samples so the centroid engine can
/// compute the class mean lazily without rescanning.
#[derive(Debug, Clone)]
pub struct GestureClass {
    label: String,
    samples: Vec<Array1<f32>>,
    sum: Array1<f32>,
}

impl GestureClass {
    fn new(label: String, feature_len: usize) -> Self {
        Self {
            label,
            samples: Vec::new(),
            sum: Array1::zeros(feature_len),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn samples(&self) -> &[Array1<f32>] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean descriptor over all samples, `None` for an empty class.
    /// Empty classes never participate in classification.
    pub fn mean(&self) -> Option<Array1<f32>> {
        if self.samples.is_empty() {
            return None;
        }
        Some(&self.sum / self.samples.len() as f32)
    }

    fn push(&mut self, vector: Array1<f32>) {
        self.sum += &vector;
        self.samples.push(vector);
    }
}

/// Process-wide mapping from label to gesture class.
///
/// Populated at startup by merging the durable cache and any remote
/// collections; every valid sample from every source accumulates, with
/// exact `(label, vector)` duplicates collapsed by fingerprint so repeated
/// loads cannot skew nearest-neighbor results toward one class.
///
/// Classes iterate in insertion order, which makes nearest-neighbor tie
/// breaking stable.
#[derive(Debug)]
pub struct SampleStore {
    feature_len: usize,
    classes: Vec<GestureClass>,
    index: HashMap<String, usize>,
    seen: HashSet<[u8; 32]>,
}

impl SampleStore {
    pub fn new(feature_len: usize) -> Self {
        Self {
            feature_len,
            classes: Vec::new(),
            index: HashMap::new(),
            seen: HashSet::new(),
        }
    }

    pub fn feature_len(&self) -> usize {
        self.feature_len
    }

    /// Appends a sample to its class, creating the class on first use.
    ///
    /// Returns `Ok(true)` when the sample was added, `Ok(false)` when an
    /// identical `(label, vector)` sample was already present. Validation
    /// failures leave the store untouched.
    pub fn add_sample(&mut self, label: &str, vector: Array1<f32>) -> Result<bool, StoreError> {
        if label.trim().is_empty() {
            return Err(StoreError::ValidationError(
                "label cannot be empty".into(),
            ));
        }
        if vector.len() != self.feature_len {
            return Err(StoreError::ValidationError(format!(
                "vector has {} entries, expected {}",
                vector.len(),
                self.feature_len
            )));
        }

        let print = fingerprint(label, vector.iter().copied());
        if !self.seen.insert(print) {
            debug!("skipping duplicate sample for '{}'", label);
            return Ok(false);
        }

        let idx = match self.index.get(label) {
            Some(&idx) => idx,
            None => {
                self.classes
                    .push(GestureClass::new(label.to_string(), self.feature_len));
                self.index.insert(label.to_string(), self.classes.len() - 1);
                self.classes.len() - 1
            }
        };
        self.classes[idx].push(vector);
        Ok(true)
    }

    /// Lenient single-record merge used when loading from cache or remote
    /// sources: a malformed record is skipped with a warning instead of
    /// aborting the merge. Returns whether the record was added.
    pub fn merge_record(&mut self, record: &TrainingRecord) -> bool {
        if let Err(e) = record.validate(self.feature_len) {
            warn!("skipping malformed record for '{}': {}", record.label, e);
            return false;
        }
        match self.add_sample(&record.label, Array1::from_vec(record.data.clone())) {
            Ok(added) => added,
            Err(e) => {
                warn!("skipping record for '{}': {}", record.label, e);
                false
            }
        }
    }

    /// Merges a batch of records, returning how many were actually added
    pub fn merge_records(&mut self, records: &[TrainingRecord]) -> usize {
        records
            .iter()
            .filter(|record| self.merge_record(record))
            .count()
    }

    /// Merges the cache blob shape (`label -> list of vectors`)
    pub fn merge_cached(&mut self, cached: &HashMap<String, Vec<Vec<f32>>>) -> usize {
        let mut added = 0;
        for (label, samples) in cached {
            for sample in samples {
                let record = TrainingRecord::new(label.clone(), sample.clone());
                if self.merge_record(&record) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Classes in insertion order
    pub fn classes(&self) -> impl Iterator<Item = &GestureClass> {
        self.classes.iter()
    }

    pub fn class(&self, label: &str) -> Option<&GestureClass> {
        self.index.get(label).map(|&idx| &self.classes[idx])
    }

    pub fn labels(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.label()).collect()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn num_samples(&self) -> usize {
        self.classes.iter().map(|c| c.len()).sum()
    }

    /// Whether at least one class has training data
    pub fn is_trained(&self) -> bool {
        self.classes.iter().any(|c| !c.is_empty())
    }

    /// Snapshot in the cache blob shape, for flushing to disk
    pub fn snapshot(&self) -> HashMap<String, Vec<Vec<f32>>> {
        self.classes
            .iter()
            .map(|class| {
                let samples = class
                    .samples()
                    .iter()
                    .map(|s| s.to_vec())
                    .collect::<Vec<_>>();
                (class.label().to_string(), samples)
            })
            .collect()
    }

    /// Clears every class and the dedup index. Local-only; callers decide
    /// what happens to the durable cache.
    pub fn clear(&mut self) {
        self.classes.clear();
        self.index.clear();
        self.seen.clear();
    }
}

/// Stable identity of a sample, used to collapse duplicates across the
/// cache and remote sources
fn fingerprint(label: &str, data: impl Iterator<Item = f32>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    hasher.update([0u8]);
    for value in data {
        hasher.update(value.to_le_bytes());
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_duplicate_samples_collapse() {
        let mut store = SampleStore::new(3);
        let v = arr1(&[0.1f32, 0.2, 0.3]);
        assert!(store.add_sample("A", v.clone()).unwrap());
        assert!(!store.add_sample("A", v).unwrap());
        assert_eq!(store.num_samples(), 1);
    }

    #[test]
    fn test_same_vector_different_label_is_kept() {
        let mut store = SampleStore::new(3);
        let v = arr1(&[0.1f32, 0.2, 0.3]);
        assert!(store.add_sample("A", v.clone()).unwrap());
        assert!(store.add_sample("B", v).unwrap());
        assert_eq!(store.num_classes(), 2);
    }

    #[test]
    fn test_wrong_length_rejected_without_state_change() {
        let mut store = SampleStore::new(3);
        let result = store.add_sample("A", arr1(&[0.1f32, 0.2]));
        assert!(matches!(result, Err(StoreError::ValidationError(_))));
        assert!(!store.is_trained());
    }

    #[test]
    fn test_class_mean() {
        let mut store = SampleStore::new(2);
        store.add_sample("A", arr1(&[0.0f32, 0.0])).unwrap();
        store.add_sample("A", arr1(&[2.0f32, 4.0])).unwrap();
        let mean = store.class("A").unwrap().mean().unwrap();
        assert_eq!(mean, arr1(&[1.0f32, 2.0]));
    }

    #[test]
    fn test_record_legacy_field_alias() {
        let record: TrainingRecord =
            serde_json::from_str(r#"{"label":"A","landmarks":[0.0,1.0,2.0]}"#).unwrap();
        assert_eq!(record.data.len(), 3);
        assert!(record.normalized);
    }
}
