use serde::{Deserialize, Serialize};

use super::CallPhase;

/// State of the call currently being tracked.
///
/// `Answered` is only reachable from `Ringing`; an off-hook event that was not
/// preceded by ringing (an outgoing call) leaves the session untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSession {
    /// Last non-empty caller number seen during this session
    pub caller_number: Option<String>,

    /// Current tracked phase
    pub phase: CallPhase,
}

impl CallSession {
    /// Apply one call-state change.
    ///
    /// Returns the caller number when the change ends a call that rang and was
    /// never answered. After an idle change the session is back to its default
    /// state whatever the outcome.
    pub fn apply(&mut self, new_phase: CallPhase, number: Option<&str>) -> Option<String> {
        // Some devices only report the number with the ringing event
        if let Some(number) = number.map(str::trim).filter(|n| !n.is_empty()) {
            self.caller_number = Some(number.to_string());
        }

        match new_phase {
            CallPhase::Ringing => {
                self.phase = CallPhase::Ringing;
                None
            }
            CallPhase::Answered => {
                if self.phase == CallPhase::Ringing {
                    self.phase = CallPhase::Answered;
                }
                None
            }
            CallPhase::Idle => {
                let missed = if self.phase == CallPhase::Ringing {
                    self.caller_number.take()
                } else {
                    None
                };
                self.reset();
                missed
            }
        }
    }

    /// Forget everything about the current call
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True while a call is ringing or connected
    pub fn is_active(&self) -> bool {
        self.phase != CallPhase::Idle
    }
}
