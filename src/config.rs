use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-dotfile options from the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DotfileRule {
    /// Shell condition gating reinstallation; absent means always reinstall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reinstall_condition: Option<String>,
}

/// User configuration: which dotfiles to restore, where application config
/// files live, and optionally where the backup tree sits.
///
/// Loaded from `$XDG_CONFIG_HOME/rehome/config.toml`; a missing file means
/// defaults (no rules, no mapping).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Backup tree root; overridden by `--backup-dir`. Supports `~` and
    /// environment variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,

    /// Dotfile identifier -> options. Identifiers are home-relative
    /// fragments (`.vimrc`) or absolute paths (`/etc/hosts`).
    #[serde(default)]
    pub dotfiles: BTreeMap<String, DotfileRule>,

    /// Live destination path -> location relative to the configs backup
    /// directory.
    #[serde(default)]
    pub config_mapping: BTreeMap<String, String>,
}

impl RestoreConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Default config file location: `$XDG_CONFIG_HOME/rehome/config.toml`.
pub fn config_file() -> Result<PathBuf> {
    let base = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| -> Result<PathBuf> {
            let dirs = directories::BaseDirs::new().context("Failed to get home directory")?;
            Ok(dirs.home_dir().join(".config"))
        })?;

    Ok(base.join("rehome").join("config.toml"))
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(raw).with_context(|| format!("Failed to expand path {raw}"))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
