//! Call outcome tracking
//!
//! The tracker turns the raw stream of call-state changes into at most one
//! [`MissedCallAction`] per call that rang without being answered. It does not
//! dispatch anything itself; the returned action is handed to a dispatcher.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::config::SharedSettings;
use crate::{CallEvent, CallPhase, CallSession, MissedCallAction};

/// Owns the session of the call currently in progress
#[derive(Debug)]
pub struct CallOutcomeTracker {
    session: CallSession,
    settings: SharedSettings,
    /// Set when an event was dropped while the service was disabled
    missed_events: bool,
}

impl CallOutcomeTracker {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            session: CallSession::default(),
            settings,
            missed_events: false,
        }
    }

    /// Current session state
    pub fn session(&self) -> &CallSession {
        &self.session
    }

    /// Feed one call-state change.
    ///
    /// While the service is disabled events are dropped without touching the
    /// session. The first event after re-enabling starts from a fresh session,
    /// because the call that was in progress may have ended unseen. The custom
    /// message is read when the action is produced, so edits made during a
    /// call apply to that call.
    pub fn on_call_state_changed(
        &mut self,
        new_phase: CallPhase,
        number: Option<&str>,
    ) -> Option<MissedCallAction> {
        if !self.settings.service_enabled() {
            debug!(phase = %new_phase, "Service disabled, ignoring call state");
            self.missed_events = true;
            return None;
        }

        if self.missed_events {
            if self.session.is_active() {
                debug!(
                    phase = %self.session.phase,
                    "Dropping call seen before the service was disabled"
                );
            }
            self.session.reset();
            self.missed_events = false;
        }

        let before = self.session.phase;
        let missed = self.session.apply(new_phase, number);
        debug!(
            from = %before,
            to = %self.session.phase,
            event = %new_phase,
            "Call state changed"
        );

        let number = missed?;
        info!(number = %number, "Unanswered call detected");
        Some(MissedCallAction::new(number, self.settings.custom_message()))
    }

    /// Feed a [`CallEvent`]
    pub fn handle(&mut self, event: &CallEvent) -> Option<MissedCallAction> {
        self.on_call_state_changed(event.phase, event.number.as_deref())
    }
}

/// Tracker guarded by one lock, for sources that deliver from several threads.
///
/// The lock covers the whole read-modify-write of the session.
#[derive(Debug, Clone)]
pub struct SharedTracker {
    inner: Arc<Mutex<CallOutcomeTracker>>,
}

impl SharedTracker {
    pub fn new(tracker: CallOutcomeTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn on_call_state_changed(
        &self,
        new_phase: CallPhase,
        number: Option<&str>,
    ) -> Option<MissedCallAction> {
        let mut tracker = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        tracker.on_call_state_changed(new_phase, number)
    }

    pub fn handle(&self, event: &CallEvent) -> Option<MissedCallAction> {
        self.on_call_state_changed(event.phase, event.number.as_deref())
    }

    /// Copy of the current session state
    pub fn session(&self) -> CallSession {
        let tracker = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        tracker.session().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MESSAGE, Settings};

    fn tracker() -> CallOutcomeTracker {
        CallOutcomeTracker::new(SharedSettings::default())
    }

    #[test]
    fn test_missed_call_uses_configured_message() {
        let settings = SharedSettings::new(Settings {
            custom_message: "Back soon".to_string(),
            ..Settings::default()
        });
        let mut tracker = CallOutcomeTracker::new(settings);

        assert!(tracker.on_call_state_changed(CallPhase::Ringing, Some("3001234567")).is_none());
        let action = tracker.on_call_state_changed(CallPhase::Idle, None).unwrap();

        assert_eq!(action, MissedCallAction::new("3001234567", "Back soon"));
    }

    #[test]
    fn test_disabled_events_do_not_touch_session() {
        let settings = SharedSettings::default();
        let mut tracker = CallOutcomeTracker::new(settings.clone());

        settings.set_service_enabled(false);
        tracker.on_call_state_changed(CallPhase::Ringing, Some("3001234567"));
        assert_eq!(tracker.session(), &CallSession::default());
    }

    #[test]
    fn test_session_reset_after_reenable() {
        let settings = SharedSettings::default();
        let mut tracker = CallOutcomeTracker::new(settings.clone());

        tracker.on_call_state_changed(CallPhase::Ringing, Some("3001111111"));
        settings.set_service_enabled(false);
        tracker.on_call_state_changed(CallPhase::Idle, None);
        settings.set_service_enabled(true);

        assert!(tracker.on_call_state_changed(CallPhase::Ringing, None).is_none());
        assert_eq!(tracker.session().caller_number, None);
        assert!(tracker.on_call_state_changed(CallPhase::Idle, None).is_none());
    }

    #[test]
    fn test_message_read_at_idle() {
        let settings = SharedSettings::default();
        let mut tracker = CallOutcomeTracker::new(settings.clone());

        tracker.on_call_state_changed(CallPhase::Ringing, Some("3001234567"));
        settings.set_custom_message("edited while ringing");
        let action = tracker.on_call_state_changed(CallPhase::Idle, None).unwrap();

        assert_eq!(action.message, "edited while ringing");
    }

    #[test]
    fn test_handle_event() {
        let mut tracker = tracker();
        tracker.handle(&CallEvent::ringing(Some("3001234567")));
        let action = tracker.handle(&CallEvent::idle()).unwrap();
        assert_eq!(action.number, "3001234567");
        assert_eq!(action.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn test_shared_tracker_across_threads() {
        let shared = SharedTracker::new(tracker());

        let ringer = shared.clone();
        std::thread::spawn(move || {
            ringer.on_call_state_changed(CallPhase::Ringing, Some("3001234567"));
        })
        .join()
        .unwrap();

        assert_eq!(shared.session().phase, CallPhase::Ringing);
        let action = shared.handle(&CallEvent::idle()).unwrap();
        assert_eq!(action.number, "3001234567");
        assert_eq!(shared.session(), CallSession::default());
    }
}
