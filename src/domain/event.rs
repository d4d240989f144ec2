use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CallPhase;

/// A single call-state change delivered by an event source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEvent {
    /// New phase reported by the telephony layer
    pub phase: CallPhase,

    /// Caller number, when the device reports it with this event
    #[serde(default)]
    pub number: Option<String>,

    /// Line (subscription) the event was reported on, for multi-line devices
    #[serde(default)]
    pub line_id: Option<i32>,

    /// When the event was received
    #[serde(default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl CallEvent {
    /// Create an event with no number and no line
    pub fn new(phase: CallPhase) -> Self {
        Self {
            phase,
            number: None,
            line_id: None,
            received_at: Utc::now(),
        }
    }

    /// Create a ringing event
    pub fn ringing(number: Option<&str>) -> Self {
        Self::new(CallPhase::Ringing).with_number(number)
    }

    /// Create an answered (off-hook) event
    pub fn answered() -> Self {
        Self::new(CallPhase::Answered)
    }

    /// Create an idle event
    pub fn idle() -> Self {
        Self::new(CallPhase::Idle)
    }

    /// Attach the caller number
    pub fn with_number(mut self, number: Option<&str>) -> Self {
        self.number = number.map(str::to_string);
        self
    }

    /// Attach the line the event was reported on
    pub fn on_line(mut self, line_id: i32) -> Self {
        self.line_id = Some(line_id);
        self
    }
}
