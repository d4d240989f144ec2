//! Missed-call dispatch
//!
//! Turns a [`MissedCallAction`] into a WhatsApp conversation: the number is
//! normalized, a messaging app is picked, and the resulting deep link is
//! either opened straight away or offered through a notification.
//!
//! Nothing here is retried. By the time an action arrives the call is over,
//! so a failed delivery is logged and dropped.

mod error;
mod link;
mod normalize;
mod notification;
mod platform;

pub use error::{DispatchError, PlatformError};
pub use link::DeepLink;
pub use normalize::normalize_number;
pub use notification::{MISSED_CALL_NOTIFICATION_ID_BASE, MissedCallNotification, notification_id};
pub use platform::{DesktopPlatform, DryRunPlatform, Platform};

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::MissedCallAction;
use crate::config::{Config, DispatchMode, DispatchSettings, NumberRules, SharedSettings};

/// Result of dispatching one action
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The conversation was opened
    Opened(DeepLink),
    /// A notification offering the conversation was posted
    Notified { id: i32, link: DeepLink },
    /// Nothing was delivered
    Skipped(DispatchError),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        !matches!(self, DispatchOutcome::Skipped(_))
    }
}

/// Delivers missed-call actions through a [`Platform`]
pub struct Dispatcher {
    platform: Arc<dyn Platform>,
    settings: SharedSettings,
    dispatch: DispatchSettings,
    numbers: NumberRules,
}

impl Dispatcher {
    pub fn new(platform: Arc<dyn Platform>, settings: SharedSettings, config: &Config) -> Self {
        Self {
            platform,
            settings,
            dispatch: config.dispatch.clone(),
            numbers: config.numbers.clone(),
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.dispatch.mode
    }

    /// Pick the installed messaging app to target.
    ///
    /// `preferred` (usually the user's selection) wins when installed, then
    /// the configured preference order. `None` means no app is installed and
    /// the web link should be used.
    pub fn select_package(&self, preferred: Option<&str>) -> Option<String> {
        if let Some(package) = preferred {
            if self.platform.is_package_installed(package) {
                return Some(package.to_string());
            }
            warn!(
                "{}, trying other apps",
                DispatchError::TargetAppUnavailable(package.to_string())
            );
        }

        self.dispatch
            .package_preference
            .iter()
            .find(|package| self.platform.is_package_installed(package))
            .cloned()
    }

    /// Build the deep link for `number` without opening it
    pub fn build_link(
        &self,
        number: &str,
        message: &str,
        preferred: Option<&str>,
    ) -> Result<DeepLink, DispatchError> {
        let phone = normalize_number(number, &self.numbers)?;
        if message.trim().is_empty() {
            return Err(DispatchError::EmptyMessage);
        }

        let link = match self.select_package(preferred) {
            Some(package) => DeepLink::for_package(&package, &phone, message),
            None => DeepLink::web(&phone, message),
        };
        debug!(%link, "Built deep link");
        Ok(link)
    }

    /// Deliver an action using the configured mode, logging the outcome
    pub fn dispatch(&self, action: &MissedCallAction) -> DispatchOutcome {
        let outcome = match self.deliver(action) {
            Ok(outcome) => outcome,
            Err(e) => DispatchOutcome::Skipped(e),
        };

        match &outcome {
            DispatchOutcome::Opened(link) => {
                info!(number = %action.number, %link, "Opened conversation for missed call");
            }
            DispatchOutcome::Notified { id, link } => {
                info!(number = %action.number, id, %link, "Posted missed call notification");
            }
            DispatchOutcome::Skipped(e @ DispatchError::Unexpected(_)) => {
                error!(number = %action.number, "Missed call not delivered: {}", e);
            }
            DispatchOutcome::Skipped(e) => {
                warn!(number = %action.number, "Missed call not delivered: {}", e);
            }
        }

        outcome
    }

    fn deliver(&self, action: &MissedCallAction) -> Result<DispatchOutcome, DispatchError> {
        let selected = self.settings.selected_messaging_package();
        let link = self.build_link(&action.number, &action.message, selected.as_deref())?;

        match self.dispatch.mode {
            DispatchMode::Open => {
                let opened = self.open_with_fallback(link, &action.message)?;
                Ok(DispatchOutcome::Opened(opened))
            }
            DispatchMode::Notify => {
                if !self.platform.notifications_enabled() {
                    return Err(DispatchError::PermissionDenied(
                        "posting notifications".to_string(),
                    ));
                }
                let notification = MissedCallNotification::new(&action.number, link);
                self.platform.post_notification(&notification)?;
                Ok(DispatchOutcome::Notified {
                    id: notification.id,
                    link: notification.link,
                })
            }
        }
    }

    /// Open a conversation right away, whatever the configured mode.
    ///
    /// `package` overrides the selected app for this send only.
    pub fn open_now(
        &self,
        number: &str,
        message: &str,
        package: Option<&str>,
    ) -> Result<DeepLink, DispatchError> {
        let selected = self.settings.selected_messaging_package();
        let preferred = package.or(selected.as_deref());
        let link = self.build_link(number, message, preferred)?;
        self.open_with_fallback(link, message)
    }

    /// Open `link`; if an app link fails, retry with the web link
    fn open_with_fallback(&self, link: DeepLink, message: &str) -> Result<DeepLink, DispatchError> {
        let phone = match &link {
            DeepLink::App { phone, .. } => phone.clone(),
            DeepLink::Web { .. } => {
                self.platform.open_link(&link)?;
                return Ok(link);
            }
        };

        match self.platform.open_link(&link) {
            Ok(()) => Ok(link),
            Err(e) => {
                warn!("{}, falling back to web link", DispatchError::from(e));
                let web = DeepLink::web(&phone, message);
                self.platform.open_link(&web)?;
                Ok(web)
            }
        }
    }
}
