use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DeepLink;

/// Ids of missed-call notifications start here; the offset comes from the
/// caller number so repeated calls from one number replace each other.
pub const MISSED_CALL_NOTIFICATION_ID_BASE: i32 = 200;

/// Interactive notification offering to answer a missed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedCallNotification {
    pub id: i32,
    pub title: String,
    pub body: String,
    /// Label of the action button
    pub action_label: String,
    /// Opened on tap and by the action button
    pub link: DeepLink,
    pub missed_at: DateTime<Utc>,
}

impl MissedCallNotification {
    pub fn new(number: &str, link: DeepLink) -> Self {
        Self {
            id: notification_id(number),
            title: "Missed call".to_string(),
            body: format!("From: {number}"),
            action_label: "Send message".to_string(),
            link,
            missed_at: Utc::now(),
        }
    }
}

/// Stable id for a number (31-based string hash, wrapping)
pub fn notification_id(number: &str) -> i32 {
    let hash = number
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)));
    MISSED_CALL_NOTIFICATION_ID_BASE.wrapping_add(hash)
}
