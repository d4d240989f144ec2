use serde::{Deserialize, Serialize};

/// Output of the tracker: an inbound call rang and nobody answered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedCallAction {
    /// Number of the caller, as reported by the device
    pub number: String,

    /// Message to send back, taken from the configured custom message
    pub message: String,
}

impl MissedCallAction {
    pub fn new(number: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            message: message.into(),
        }
    }
}
