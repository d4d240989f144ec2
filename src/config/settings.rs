//! Service settings read by the tracker

use serde::{Deserialize, Serialize};

/// Message sent when no custom message has been configured
pub const DEFAULT_MESSAGE: &str = "\
Hi! Sorry we missed your call.
We answer on WhatsApp (not calls).
Send us what you need and we will get back to you shortly.
Open 24/7.";

/// General settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Master switch. When false every call-state event is ignored.
    #[serde(default = "default_service_enabled")]
    pub service_enabled: bool,

    /// Text sent back to the caller of a missed call
    #[serde(default = "default_custom_message")]
    pub custom_message: String,

    /// Messaging app package chosen by the user (e.g. "com.whatsapp.w4b")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_messaging_package: Option<String>,

    /// Line (subscription id) whose calls are tracked on multi-line devices.
    /// When unset, events from every line are tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_line_id: Option<i32>,
}

fn default_service_enabled() -> bool {
    true
}

fn default_custom_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_enabled: default_service_enabled(),
            custom_message: default_custom_message(),
            selected_messaging_package: None,
            selected_line_id: None,
        }
    }
}

impl Settings {
    /// Replace a blank stored message with the default template.
    ///
    /// Returns true if the message was changed.
    pub fn fill_blank_message(&mut self) -> bool {
        if self.custom_message.trim().is_empty() {
            self.custom_message = default_custom_message();
            return true;
        }
        false
    }
}
