//! Run command implementation

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use msm::config::{Config, SharedSettings};
use msm::dispatch::{DesktopPlatform, Dispatcher, DryRunPlatform, Platform};
use msm::service::{CallService, ServiceReport};
use msm::source::{CallEventSource, LineSource};

/// How often the config file is checked for edits made by other commands
const SETTINGS_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Pick the host capabilities for this run
pub fn build_platform(config: &Config, dry_run: bool) -> Arc<dyn Platform> {
    if dry_run {
        Arc::new(DryRunPlatform::new(&config.dispatch))
    } else {
        Arc::new(DesktopPlatform::new(&config.dispatch))
    }
}

/// Run the call service until the event input ends
pub async fn run_command(config_path: &Path, input: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let config = Config::load_from(config_path)?;

    // Same rule as starting on boot: a disabled service stays down
    if !config.settings.service_enabled {
        println!("Service is disabled. Enable it with `msm enable`.");
        return Ok(());
    }

    let settings = SharedSettings::new(config.settings.clone());
    let dispatcher = Arc::new(Dispatcher::new(
        build_platform(&config, dry_run),
        settings.clone(),
        &config,
    ));

    let watcher = tokio::spawn(watch_settings(
        config_path.to_path_buf(),
        config.clone(),
        settings.clone(),
    ));

    let report = match input {
        Some(path) => {
            let source = LineSource::open(&path)
                .await
                .with_context(|| format!("Failed to open event input: {}", path.display()))?;
            serve(source, settings, dispatcher).await
        }
        None => serve(LineSource::stdin(), settings, dispatcher).await,
    };

    watcher.abort();
    let report = report?;

    let stats = &report.stats;
    println!(
        "Processed {} events ({} from other lines): {} missed calls, {} delivered, {} skipped",
        stats.events_received,
        stats.events_filtered,
        stats.missed_calls,
        stats.delivered,
        stats.skipped
    );

    Ok(())
}

async fn serve<S: CallEventSource>(
    source: S,
    settings: SharedSettings,
    dispatcher: Arc<Dispatcher>,
) -> Result<ServiceReport> {
    CallService::new(source, settings, dispatcher).run().await
}

/// What a config file check did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reload {
    Unchanged,
    /// New `[settings]` are live; `restart_needed` is set when `[dispatch]`
    /// or `[numbers]` differ from the ones the service started with
    Applied { restart_needed: bool },
    Failed,
}

/// Reload settings whenever the config file changes on disk
async fn watch_settings(path: PathBuf, startup: Config, settings: SharedSettings) {
    let mut last_modified = modified_at(&path);
    let mut ticker = tokio::time::interval(SETTINGS_POLL_INTERVAL);
    let mut warned = false;

    loop {
        ticker.tick().await;

        match reload_if_changed(&path, &mut last_modified, &startup, &settings) {
            Reload::Applied {
                restart_needed: true,
            } if !warned => {
                tracing::warn!(
                    "[dispatch] or [numbers] changed in {}; restart `msm run` to apply them",
                    path.display()
                );
                warned = true;
            }
            Reload::Applied {
                restart_needed: false,
            } => warned = false,
            _ => {}
        }
    }
}

/// Swap in `[settings]` from `path` if its mtime moved since `last_modified`
fn reload_if_changed(
    path: &Path,
    last_modified: &mut Option<SystemTime>,
    startup: &Config,
    settings: &SharedSettings,
) -> Reload {
    let modified = modified_at(path);
    if modified == *last_modified {
        return Reload::Unchanged;
    }
    *last_modified = modified;

    match Config::from_file(path) {
        Ok(config) => {
            tracing::debug!("Reloaded settings from {}", path.display());
            let restart_needed =
                config.dispatch != startup.dispatch || config.numbers != startup.numbers;
            settings.replace(config.settings);
            Reload::Applied { restart_needed }
        }
        Err(e) => {
            tracing::warn!("Keeping previous settings: {:#}", e);
            Reload::Failed
        }
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
