//! Send command implementation

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use msm::config::{Config, SharedSettings};
use msm::dispatch::{Dispatcher, Platform};

use super::run::build_platform;

/// Open a conversation with `number` right now, using the stored message
pub async fn send_command(
    config_path: &Path,
    number: &str,
    package: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let settings = SharedSettings::new(config.settings.clone());
    let platform: Arc<dyn Platform> = build_platform(&config, dry_run);
    let dispatcher = Dispatcher::new(platform, settings, &config);

    let link = dispatcher
        .open_now(number, &config.settings.custom_message, package)
        .with_context(|| format!("Could not open WhatsApp for {}", number))?;

    println!("Opened: {}", link.uri());
    Ok(())
}
