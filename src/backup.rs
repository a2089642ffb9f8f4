use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{expand_path, RestoreConfig};

/// Backup category directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupPath {
    /// Backup root itself.
    Root,
    /// Dotfile tree: `<root>/dotfiles`.
    Dotfiles,
    /// Package manager lists: `<root>/packages`.
    Packages,
    /// Font files: `<root>/fonts`.
    Fonts,
    /// Application config files: `<root>/configs`.
    Configs,
}

impl BackupPath {
    /// Human-readable category name for diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "backup",
            Self::Dotfiles => "dotfile",
            Self::Packages => "package",
            Self::Fonts => "font",
            Self::Configs => "config",
        }
    }
}

/// Typed precondition failure: a restore phase refuses to start from an
/// empty or missing backup category.
#[derive(Debug, Error)]
#[error("No {category} backup found at {path} - nothing to restore")]
pub struct EmptyBackup {
    pub category: &'static str,
    pub path: PathBuf,
}

/// A previously created backup tree, read-only for this tool.
#[derive(Debug, Clone)]
pub struct Backup {
    root: PathBuf,
}

impl Backup {
    /// Resolve the backup root: `--backup-dir` flag, then the config file's
    /// `backup_dir`, then `~/.rehome/backup`.
    pub fn locate(flag: Option<&str>, config: &RestoreConfig) -> Result<Self> {
        let root = if let Some(dir) = flag {
            expand_path(dir)?
        } else if let Some(dir) = &config.backup_dir {
            expand_path(dir)?
        } else {
            let dirs = directories::BaseDirs::new().context("Failed to get home directory")?;
            dirs.home_dir().join(".rehome").join("backup")
        };

        Ok(Self { root })
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the directory for a backup category.
    pub fn path(&self, path_type: BackupPath) -> PathBuf {
        match path_type {
            BackupPath::Root => self.root.clone(),
            BackupPath::Dotfiles => self.root.join("dotfiles"),
            BackupPath::Packages => self.root.join("packages"),
            BackupPath::Fonts => self.root.join("fonts"),
            BackupPath::Configs => self.root.join("configs"),
        }
    }

    /// Fail with a typed precondition error unless the category directory
    /// exists and contains at least one entry.
    pub fn ensure_not_empty(&self, path_type: BackupPath) -> Result<PathBuf> {
        let dir = self.path(path_type);
        if !dir_has_entries(&dir)? {
            return Err(EmptyBackup {
                category: path_type.label(),
                path: dir,
            }
            .into());
        }
        Ok(dir)
    }
}

fn dir_has_entries(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read backup directory {}", dir.display()))?;
    Ok(entries.next().is_some())
}

/// Resolve the destination home directory: `--home` flag or the invoking
/// user's home.
pub fn resolve_home(flag: Option<&str>) -> Result<PathBuf> {
    match flag {
        Some(dir) => expand_path(dir),
        None => {
            let dirs = directories::BaseDirs::new().context("Failed to get home directory")?;
            Ok(dirs.home_dir().to_path_buf())
        }
    }
}
