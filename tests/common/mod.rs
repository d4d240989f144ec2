//! Shared test utilities for dispatch and service tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use msm::config::{Config, SharedSettings};
use msm::dispatch::{DeepLink, Dispatcher, MissedCallNotification, Platform, PlatformError};

/// Platform fake that records everything it is asked to do
#[derive(Default)]
pub struct RecordingPlatform {
    pub installed: HashSet<String>,
    pub notifications_enabled: bool,
    /// Make every app link fail to open, as if the app vanished
    pub fail_app_links: bool,
    pub opened: Mutex<Vec<DeepLink>>,
    pub notifications: Mutex<Vec<MissedCallNotification>>,
}

impl RecordingPlatform {
    pub fn new(installed: &[&str]) -> Self {
        Self {
            installed: installed.iter().map(|p| p.to_string()).collect(),
            notifications_enabled: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<DeepLink> {
        self.opened.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<MissedCallNotification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Platform for RecordingPlatform {
    fn is_package_installed(&self, package: &str) -> bool {
        self.installed.contains(package)
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    fn open_link(&self, link: &DeepLink) -> Result<(), PlatformError> {
        if let Some(package) = link.package() {
            if self.fail_app_links {
                return Err(PlatformError::NotInstalled(package.to_string()));
            }
        }
        self.opened.lock().unwrap().push(link.clone());
        Ok(())
    }

    fn post_notification(&self, notification: &MissedCallNotification) -> Result<(), PlatformError> {
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Build a dispatcher over `platform` with the given config
pub fn dispatcher(platform: Arc<RecordingPlatform>, config: &Config) -> (Dispatcher, SharedSettings) {
    let settings = SharedSettings::new(config.settings.clone());
    let dispatcher = Dispatcher::new(platform, settings.clone(), config);
    (dispatcher, settings)
}
