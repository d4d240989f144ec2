//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.msm/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".msm")
    }

    /// Get the global config file path (~/.msm/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from `path`, creating it with defaults if missing.
    ///
    /// A blank stored message is replaced by the default template and the
    /// file is rewritten so the user sees what is actually sent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::auto_init(path)?;
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.settings.fill_blank_message() {
            tracing::debug!("Stored message was blank, saving default template");
            if let Err(e) = config.save_to_file(path) {
                tracing::warn!("Failed to save config after filling default message: {}", e);
            }
        }

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// The CLI edits settings while `msm run` may be reading them, so writes
    /// hold an exclusive lock and go through a temp file + rename.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.save_with_header(path, "")
    }

    /// Like [`Config::save_to_file`], with `header` (TOML comments) written
    /// above the settings
    pub fn save_with_header(&self, path: &Path, header: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = format!("{}{}", header, self.to_toml()?);
        let _lock = lock_config(path)?;
        write_atomic(path, &content)
        // Lock is released when _lock is dropped
    }

    /// Write a default config when none exists.
    ///
    /// Another process may create the file between the existence check and
    /// taking the lock, so the check is repeated under the lock.
    fn auto_init(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let _lock = lock_config(path)?;
        if path.exists() {
            return Ok(());
        }

        let content = Self::default().to_toml()?;
        write_atomic(path, &content)?;

        tracing::info!("Created {}", path.display());
        Ok(())
    }
}

fn lock_config(path: &Path) -> Result<File> {
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    Ok(lock_file)
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}
