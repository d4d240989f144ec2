use serde::{Deserialize, Serialize};

/// Tracked phase of a call, as reported by the telephony layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallPhase {
    /// No call is active
    #[default]
    Idle,
    /// An inbound call is alerting
    Ringing,
    /// A call is connected (inbound answered or outgoing placed)
    Answered,
}

impl CallPhase {
    /// Map a raw telephony state to a phase.
    ///
    /// Accepts the state names (`RINGING`, `OFFHOOK`, `IDLE`, case-insensitive,
    /// plus `ANSWERED`) and the numeric call-state codes `0` (idle),
    /// `1` (ringing) and `2` (off-hook). Anything else is `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "idle" | "0" => Some(CallPhase::Idle),
            "ringing" | "1" => Some(CallPhase::Ringing),
            "offhook" | "off_hook" | "off-hook" | "answered" | "2" => Some(CallPhase::Answered),
            _ => None,
        }
    }

    /// Map a numeric call-state code to a phase
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CallPhase::Idle),
            1 => Some(CallPhase::Ringing),
            2 => Some(CallPhase::Answered),
            _ => None,
        }
    }
}

impl std::fmt::Display for CallPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallPhase::Idle => write!(f, "idle"),
            CallPhase::Ringing => write!(f, "ringing"),
            CallPhase::Answered => write!(f, "answered"),
        }
    }
}
