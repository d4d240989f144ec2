//! Settings shared between the running service and whoever edits them

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Settings;

/// Cheaply cloneable handle to the live settings.
///
/// The tracker reads through this handle on every event, so a change made
/// between two events (e.g. disabling the service mid-call) is seen by the
/// next one.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Settings>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    // A panic while holding the lock cannot leave Settings half-written,
    // so poisoned guards are still usable.
    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Settings> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn service_enabled(&self) -> bool {
        self.read().service_enabled
    }

    pub fn set_service_enabled(&self, enabled: bool) {
        self.write().service_enabled = enabled;
    }

    pub fn custom_message(&self) -> String {
        self.read().custom_message.clone()
    }

    pub fn set_custom_message(&self, message: impl Into<String>) {
        self.write().custom_message = message.into();
    }

    pub fn selected_messaging_package(&self) -> Option<String> {
        self.read().selected_messaging_package.clone()
    }

    pub fn selected_line_id(&self) -> Option<i32> {
        self.read().selected_line_id
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> Settings {
        self.read().clone()
    }

    /// Replace all settings at once
    pub fn replace(&self, settings: Settings) {
        *self.write() = settings;
    }
}
