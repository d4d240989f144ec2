//! Status command implementation

use anyhow::Result;
use std::path::Path;

use msm::config::Config;

/// Show the current configuration
pub async fn status_command(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let settings = &config.settings;

    println!("Config: {}\n", config_path.display());
    println!(
        "  Service:    {}",
        if settings.service_enabled { "enabled" } else { "disabled" }
    );
    println!(
        "  App:        {}",
        settings
            .selected_messaging_package
            .as_deref()
            .unwrap_or("(first installed)")
    );
    match settings.selected_line_id {
        Some(line) => println!("  Line:       {}", line),
        None => println!("  Line:       (all)"),
    }
    println!("  Mode:       {}", config.dispatch.mode);
    println!(
        "  Installed:  {}",
        if config.dispatch.installed_packages.is_empty() {
            "(none, web links)".to_string()
        } else {
            config.dispatch.installed_packages.join(", ")
        }
    );
    if config.numbers.country_code.is_empty() {
        println!("  Prefix:     (none)");
    } else {
        println!(
            "  Prefix:     +{} for {}-digit numbers",
            config.numbers.country_code, config.numbers.local_length
        );
    }

    println!("\n  Message:");
    for line in settings.custom_message.lines() {
        println!("    {}", line);
    }

    Ok(())
}
