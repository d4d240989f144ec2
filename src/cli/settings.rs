//! Commands that edit stored settings

use anyhow::{Result, bail};
use std::path::Path;

use msm::config::Config;

/// Set or flip the service switch. `None` toggles.
pub async fn set_enabled_command(config_path: &Path, enabled: Option<bool>) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    let enabled = enabled.unwrap_or(!config.settings.service_enabled);

    config.settings.service_enabled = enabled;
    config.save_to_file(config_path)?;

    println!("Service {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

/// Show the custom message, or replace it with `text`
pub async fn message_command(config_path: &Path, text: Option<String>) -> Result<()> {
    let mut config = Config::load_from(config_path)?;

    let Some(text) = text else {
        println!("{}", config.settings.custom_message);
        return Ok(());
    };

    if text.trim().is_empty() {
        bail!("The message must not be empty");
    }

    config.settings.custom_message = text;
    config.save_to_file(config_path)?;
    println!("Message saved");
    Ok(())
}

/// Select the messaging app. `None` clears the selection.
pub async fn select_app_command(config_path: &Path, package: Option<String>) -> Result<()> {
    let mut config = Config::load_from(config_path)?;

    if let Some(package) = &package {
        if !config.dispatch.installed_packages.contains(package) {
            eprintln!(
                "Note: {} is not in installed_packages; the web link will be used until it is.",
                package
            );
        }
    }

    config.settings.selected_messaging_package = package.clone();
    config.save_to_file(config_path)?;

    match package {
        Some(package) => println!("Messaging app: {}", package),
        None => println!("Messaging app: first installed"),
    }
    Ok(())
}

/// Select the line to track. `None` tracks every line.
pub async fn select_line_command(config_path: &Path, line: Option<i32>) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    config.settings.selected_line_id = line;
    config.save_to_file(config_path)?;

    match line {
        Some(line) => println!("Tracking line {}", line),
        None => println!("Tracking all lines"),
    }
    Ok(())
}
