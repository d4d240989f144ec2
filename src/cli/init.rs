//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;

use msm::config::Config;

/// Comment block written above the generated settings
pub const CONFIG_HEADER: &str = r#"# msm configuration - Missed-call Smart Messenger
# =======================
#
# [settings]
#   service_enabled            - Master switch; when false calls are ignored (default: true)
#   custom_message             - Text sent back to callers you missed
#   selected_messaging_package - Preferred app, e.g. "com.whatsapp" or "com.whatsapp.w4b"
#   selected_line_id           - Only track calls on this line (multi-line devices)
#
# [dispatch]
#   mode                  - "notify" (offer the chat in a notification) or "open" (open it at once)
#   package_preference    - Apps tried in order when the selected one is missing
#   installed_packages    - Apps this host treats as installed; empty means use https://wa.me links
#   notifications_enabled - Whether notifications may be posted
#
# [numbers]
#   country_code - Prepended to local numbers; "" disables it
#   local_length - Digit count of a local number (default: 10)
#   min_length   - Shorter numbers are rejected (default: 10)

"#;

/// Write the default configuration to `config_path`
pub async fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    Config::default().save_with_header(config_path, CONFIG_HEADER)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
