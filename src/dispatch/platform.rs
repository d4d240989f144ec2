//! Host capabilities the dispatcher relies on

use std::collections::HashSet;
use std::io;
use std::process::{Command, ExitStatus};
use std::thread::JoinHandle;

use tracing::{debug, info, warn};

use super::{DeepLink, MissedCallNotification, PlatformError};
use crate::config::DispatchSettings;

/// What the host can do on the dispatcher's behalf
pub trait Platform: Send + Sync {
    /// Whether a messaging app package is installed
    fn is_package_installed(&self, package: &str) -> bool;

    /// Whether the user allows this app to post notifications
    fn notifications_enabled(&self) -> bool;

    /// Open a deep link in the messaging app or browser
    fn open_link(&self, link: &DeepLink) -> Result<(), PlatformError>;

    /// Post an interactive notification
    fn post_notification(&self, notification: &MissedCallNotification) -> Result<(), PlatformError>;
}

/// Desktop host: links go to the system URL opener, notifications are
/// printed to the terminal.
#[derive(Debug, Clone)]
pub struct DesktopPlatform {
    installed: HashSet<String>,
    notifications_enabled: bool,
}

impl DesktopPlatform {
    pub fn new(settings: &DispatchSettings) -> Self {
        Self {
            installed: settings.installed_packages.iter().cloned().collect(),
            notifications_enabled: settings.notifications_enabled,
        }
    }
}

impl Platform for DesktopPlatform {
    fn is_package_installed(&self, package: &str) -> bool {
        self.installed.contains(package)
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    fn open_link(&self, link: &DeepLink) -> Result<(), PlatformError> {
        if let Some(package) = link.package() {
            if !self.installed.contains(package) {
                return Err(PlatformError::NotInstalled(package.to_string()));
            }
        }
        open_uri(&link.uri())
    }

    fn post_notification(&self, notification: &MissedCallNotification) -> Result<(), PlatformError> {
        if !self.notifications_enabled {
            return Err(PlatformError::PermissionDenied("notifications".to_string()));
        }

        println!(
            "[{}] {} - {}",
            notification.missed_at.format("%H:%M:%S"),
            notification.title,
            notification.body
        );
        println!("    {}: {}", notification.action_label, notification.link.uri());
        Ok(())
    }
}

/// Open a URI with the system handler
fn open_uri(uri: &str) -> Result<(), PlatformError> {
    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");

    #[cfg(target_os = "linux")]
    let mut command = std::process::Command::new("xdg-open");

    #[cfg(target_os = "windows")]
    let mut command = {
        // `cmd /C start` would split the query string on '&'
        let mut command = std::process::Command::new("rundll32");
        command.arg("url.dll,FileProtocolHandler");
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(PlatformError::Other(format!(
            "No URL opener on this platform for {uri}"
        )));
    }

    #[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
    {
        command.arg(uri);
        spawn_reaped(command)?;
        Ok(())
    }
}

/// Start `command` and wait for it on a background thread so the opener
/// never lingers as a zombie
fn spawn_reaped(
    mut command: Command,
) -> Result<JoinHandle<io::Result<ExitStatus>>, PlatformError> {
    let mut child = command.spawn()?;
    let program = command.get_program().to_string_lossy().into_owned();

    Ok(std::thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(status) if status.success() => debug!(%program, "Opener exited"),
            Ok(status) => warn!(%program, %status, "Opener exited with failure"),
            Err(e) => warn!(%program, "Failed to wait for opener: {}", e),
        }
        status
    }))
}

/// Host that only logs what it would do
#[derive(Debug, Clone)]
pub struct DryRunPlatform {
    installed: HashSet<String>,
    notifications_enabled: bool,
}

impl DryRunPlatform {
    pub fn new(settings: &DispatchSettings) -> Self {
        Self {
            installed: settings.installed_packages.iter().cloned().collect(),
            notifications_enabled: settings.notifications_enabled,
        }
    }
}

impl Platform for DryRunPlatform {
    fn is_package_installed(&self, package: &str) -> bool {
        self.installed.contains(package)
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    fn open_link(&self, link: &DeepLink) -> Result<(), PlatformError> {
        info!(link = %link.uri(), "[dry-run] Would open link");
        Ok(())
    }

    fn post_notification(&self, notification: &MissedCallNotification) -> Result<(), PlatformError> {
        info!(
            id = notification.id,
            body = %notification.body,
            link = %notification.link.uri(),
            "[dry-run] Would post notification"
        );
        Ok(())
    }
}
