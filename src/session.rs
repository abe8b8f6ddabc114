use log::{info, warn};

use crate::buffer::TextBuffer;
use crate::classifier::{Classifier, ClassifierError, Prediction};
use crate::command::{CommandAction, CommandError, CommandInterpreter};
use crate::config::Config;
use crate::gate::{GateEvent, GateInput, StabilityGate};
use crate::pose::HandPose;
use crate::store::{RemoteStore, SampleStore, StoreError, TrainingCache, TrainingRecord};
use crate::Descriptor;

/// What the host should show for one processed frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No hand in the frame
    NoHand,
    /// No training data exists yet; the user should train, not retry
    Untrained,
    /// Hand present but nothing matched or nothing is stable yet
    Analyzing,
    /// A candidate label is accumulating stable frames
    Tracking {
        label: String,
        count: u32,
        required: u32,
    },
    /// A symbol was accepted and applied to the output text
    Committed { symbol: String, text: String },
    /// Frame dropped because a classification was already in flight
    Skipped,
}

/// One recognition session owning the whole gesture pipeline: sample
/// store, classifier, stability gate and output buffer.
///
/// The host invokes [`on_frame`](Self::on_frame) once per detector output
/// at its own cadence; frames may be unevenly spaced or skipped. All
/// pipeline state is mutated only through `&mut self`, so a session is
/// single-threaded by construction.
#[derive(Debug)]
pub struct Session {
    descriptor: Descriptor,
    store: SampleStore,
    classifier: Classifier,
    gate: StabilityGate,
    buffer: TextBuffer,
    interpreter: CommandInterpreter,
    cache: TrainingCache,
    remote: Option<RemoteStore>,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, ClassifierError> {
        let descriptor = config.descriptor;
        let classifier = Classifier::builder().with_descriptor(descriptor).build()?;
        Ok(Self {
            descriptor,
            store: SampleStore::new(descriptor.characteristics().feature_len),
            classifier,
            gate: StabilityGate::default(),
            buffer: TextBuffer::new(),
            interpreter: CommandInterpreter::new(),
            cache: TrainingCache::new(&config.cache_file),
            remote: config.api_base.map(RemoteStore::new),
        })
    }

    /// Replaces the default classifier, keeping descriptor agreement
    pub fn with_classifier(mut self, classifier: Classifier) -> Result<Self, ClassifierError> {
        if classifier.descriptor() != self.descriptor {
            return Err(ClassifierError::BuildError(format!(
                "classifier descriptor {:?} does not match session descriptor {:?}",
                classifier.descriptor(),
                self.descriptor
            )));
        }
        self.classifier = classifier;
        Ok(self)
    }

    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn clear_text(&mut self) {
        self.buffer.clear();
    }

    pub fn backspace(&mut self) {
        self.buffer.backspace();
    }

    /// Populates the store by merging the durable cache and every
    /// configured remote source. Each source is tolerated independently:
    /// a missing cache, an unreachable endpoint or a malformed entry is
    /// skipped with a warning and the merge continues.
    ///
    /// Returns how many samples were added.
    pub async fn load_all(&mut self) -> usize {
        let mut added = 0;

        match self.cache.load() {
            Ok(cached) => added += self.store.merge_cached(&cached),
            Err(e) => warn!("could not read training cache: {}", e),
        }

        if let Some(remote) = self.remote.clone() {
            match remote.fetch_all().await {
                Ok(records) => added += self.store.merge_records(&records),
                Err(e) => warn!("could not load gestures from {}: {}", remote.base(), e),
            }
            match remote.fetch_legacy().await {
                Ok(records) => added += self.store.merge_records(&records),
                Err(e) => warn!("optional legacy gesture fetch failed: {}", e),
            }
            // Flush the merged mapping so the next start works offline.
            self.cache.save_logged(&self.store.snapshot());
        }

        info!(
            "training data ready: {} classes, {} samples ({} newly merged)",
            self.store.num_classes(),
            self.store.num_samples(),
            added
        );
        added
    }

    /// Processes one detector frame and advances the stability gate.
    pub fn on_frame(&mut self, pose: Option<&HandPose>) -> FrameOutcome {
        let Some(pose) = pose else {
            self.gate.advance(GateInput::NoHand);
            return FrameOutcome::NoHand;
        };

        let vector = pose.encode(self.descriptor);
        let prediction: Prediction = match self.classifier.classify(&self.store, &vector) {
            Ok(prediction) => prediction,
            Err(ClassifierError::Untrained) => return FrameOutcome::Untrained,
            Err(ClassifierError::Busy) => return FrameOutcome::Skipped,
            Err(e) => {
                warn!("classification failed: {}", e);
                return FrameOutcome::Skipped;
            }
        };

        let input = match prediction.label {
            Some(label) => GateInput::Label(label),
            None => GateInput::Unmatched,
        };

        match self.gate.advance(input) {
            GateEvent::Emitted(symbol) => {
                self.buffer.apply(&symbol);
                FrameOutcome::Committed {
                    symbol,
                    text: self.buffer.text().to_string(),
                }
            }
            GateEvent::Tracking { label, count } => FrameOutcome::Tracking {
                label,
                count,
                required: self.gate.required(),
            },
            GateEvent::Analyzing => FrameOutcome::Analyzing,
            GateEvent::NoHand => FrameOutcome::NoHand,
        }
    }

    /// Captures a labeled training sample from the current pose.
    ///
    /// Requires a visible hand; a missing pose blocks only this action.
    /// The sample is queryable on the very next classification call. The
    /// cache is rewritten immediately (failure logged, not propagated) and
    /// the remote push is spawned best-effort when a runtime is available.
    ///
    /// Returns how many samples the label now has.
    pub fn capture_sample(
        &mut self,
        label: &str,
        pose: Option<&HandPose>,
    ) -> Result<usize, StoreError> {
        let Some(pose) = pose else {
            return Err(StoreError::ValidationError(
                "no hand visible; show your hand clearly inside the camera".into(),
            ));
        };

        let vector = pose.encode(self.descriptor);
        let added = self.store.add_sample(label, vector.clone())?;

        if added {
            self.cache.save_logged(&self.store.snapshot());

            if let Some(remote) = &self.remote {
                let record = TrainingRecord::new(label, vector.to_vec());
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        let remote = remote.clone();
                        handle.spawn(async move { remote.push_logged(record).await });
                    }
                    Err(_) => {
                        warn!("no async runtime; skipping remote sync for '{}'", label)
                    }
                }
            }
        }

        let count = self.store.class(label).map(|c| c.len()).unwrap_or(0);
        info!("captured sample for '{}' (total {})", label, count);
        Ok(count)
    }

    /// Local-only full reset: clears the in-memory classes, deletes the
    /// cache file and rewinds gate and output text. The remote store is
    /// untouched.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.clear();
        self.cache.clear()?;
        self.gate.reset();
        self.buffer.clear();
        info!("training data reset");
        Ok(())
    }

    /// Interprets the given text (or the accumulated buffer) as an
    /// open-website or search command
    pub fn interpret(&self, query: &str) -> Result<CommandAction, CommandError> {
        self.interpreter.interpret(query)
    }
}
