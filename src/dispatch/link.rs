use serde::{Deserialize, Serialize};

/// A way to open a WhatsApp conversation with a message already typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeepLink {
    /// Send intent addressed to a specific installed app
    App {
        package: String,
        /// Chat id, `<digits>@s.whatsapp.net`
        jid: String,
        phone: String,
        text: String,
    },
    /// Generic click-to-chat link, opened by whatever handles https
    Web { url: String },
}

impl DeepLink {
    /// Link that targets `package` directly. `phone` must already be normalized.
    pub fn for_package(package: &str, phone: &str, text: &str) -> Self {
        DeepLink::App {
            package: package.to_string(),
            jid: format!("{phone}@s.whatsapp.net"),
            phone: phone.to_string(),
            text: text.to_string(),
        }
    }

    /// `https://wa.me/<phone>?text=<message>` link
    pub fn web(phone: &str, text: &str) -> Self {
        DeepLink::Web {
            url: format!("https://wa.me/{}?text={}", phone, urlencoding::encode(text)),
        }
    }

    /// URI form of the link.
    ///
    /// App links map to the `whatsapp://send` scheme, which desktop clients
    /// register as a handler.
    pub fn uri(&self) -> String {
        match self {
            DeepLink::App { phone, text, .. } => format!(
                "whatsapp://send?phone={}&text={}",
                phone,
                urlencoding::encode(text)
            ),
            DeepLink::Web { url } => url.clone(),
        }
    }

    /// Package this link is pinned to, if any
    pub fn package(&self) -> Option<&str> {
        match self {
            DeepLink::App { package, .. } => Some(package),
            DeepLink::Web { .. } => None,
        }
    }
}

impl std::fmt::Display for DeepLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeepLink::App { package, jid, .. } => write!(f, "{package} -> {jid}"),
            DeepLink::Web { url } => write!(f, "{url}"),
        }
    }
}
