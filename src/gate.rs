use log::debug;

/// Consecutive identical predictions required before a symbol is emitted
pub const REQUIRED_STABLE_FRAMES: u32 = 4;

/// Per-frame observation fed into the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateInput {
    /// No hand in the frame
    NoHand,
    /// Hand present but the classifier produced no label
    Unmatched,
    /// Hand present and classified
    Label(String),
}

/// What the gate decided for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// Hand left the frame; all gating state was reset
    NoHand,
    /// Hand present, nothing stable yet
    Analyzing,
    /// A label is accumulating consecutive frames
    Tracking { label: String, count: u32 },
    /// A label held long enough and was emitted exactly once
    Emitted(String),
}

/// Debouncing state machine turning noisy per-frame predictions into
/// discrete symbols.
///
/// A label is emitted once it has been predicted on `required` consecutive
/// frames, and then suppressed until the prediction changes or the hand
/// leaves the frame. An unmatched frame resets the consecutive count but
/// keeps the last-emitted memory, so flicker past the classifier threshold
/// cannot re-emit a held sign.
///
/// The gate is label-agnostic; special symbols like `Space` and `Delete`
/// are interpreted by the consumer.
#[derive(Debug)]
pub struct StabilityGate {
    required: u32,
    last_label: Option<String>,
    count: u32,
    last_emitted: Option<String>,
}

impl Default for StabilityGate {
    fn default() -> Self {
        Self::new(REQUIRED_STABLE_FRAMES)
    }
}

impl StabilityGate {
    pub fn new(required: u32) -> Self {
        Self {
            required: required.max(1),
            last_label: None,
            count: 0,
            last_emitted: None,
        }
    }

    /// Number of consecutive frames required for emission
    pub fn required(&self) -> u32 {
        self.required
    }

    /// Label currently accumulating, with its consecutive count
    pub fn tracking(&self) -> Option<(&str, u32)> {
        self.last_label.as_deref().map(|l| (l, self.count))
    }

    /// Drives the machine one detector frame forward. Frames need not be
    /// evenly spaced; only their order matters.
    pub fn advance(&mut self, input: GateInput) -> GateEvent {
        match input {
            GateInput::NoHand => {
                self.reset();
                GateEvent::NoHand
            }
            GateInput::Unmatched => {
                // Hand still present: drop the streak but keep last_emitted
                // so a momentary miss cannot repeat the held sign.
                self.last_label = None;
                self.count = 0;
                GateEvent::Analyzing
            }
            GateInput::Label(label) => {
                if self.last_label.as_deref() == Some(label.as_str()) {
                    self.count += 1;
                } else {
                    self.last_label = Some(label.clone());
                    self.count = 1;
                }

                if self.count >= self.required && self.last_emitted.as_deref() != Some(label.as_str())
                {
                    debug!("emitting '{}' after {} stable frames", label, self.count);
                    self.last_emitted = Some(label.clone());
                    GateEvent::Emitted(label)
                } else {
                    GateEvent::Tracking {
                        label,
                        count: self.count,
                    }
                }
            }
        }
    }

    /// Clears all state, including the last-emitted memory
    pub fn reset(&mut self) {
        self.last_label = None;
        self.count = 0;
        self.last_emitted = None;
    }
}
