use serde::{Deserialize, Serialize};

/// Package name of WhatsApp Messenger
pub const WHATSAPP_PACKAGE: &str = "com.whatsapp";

/// Package name of WhatsApp Business
pub const WHATSAPP_BUSINESS_PACKAGE: &str = "com.whatsapp.w4b";

/// How a missed call is handed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Raise a notification that opens the conversation when tapped
    #[default]
    Notify,
    /// Open the conversation immediately
    Open,
}

impl std::fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchMode::Notify => write!(f, "notify"),
            DispatchMode::Open => write!(f, "open"),
        }
    }
}

/// Dispatcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    #[serde(default)]
    pub mode: DispatchMode,

    /// Messaging packages tried in order when the selected one is missing
    #[serde(default = "default_package_preference")]
    pub package_preference: Vec<String>,

    /// Packages the host treats as installed.
    ///
    /// Desktop hosts cannot query an app store, so this list stands in for
    /// the package manager. Leave empty to always use the web link.
    #[serde(default)]
    pub installed_packages: Vec<String>,

    /// Whether the host may post notifications
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
}

fn default_package_preference() -> Vec<String> {
    vec![
        WHATSAPP_PACKAGE.to_string(),
        WHATSAPP_BUSINESS_PACKAGE.to_string(),
    ]
}

fn default_notifications_enabled() -> bool {
    true
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            package_preference: default_package_preference(),
            installed_packages: Vec::new(),
            notifications_enabled: default_notifications_enabled(),
        }
    }
}
