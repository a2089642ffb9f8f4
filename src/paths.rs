use std::path::{Path, PathBuf};

/// Marker that replaces the leading path separator when an originally
/// absolute path is stored inside the backup tree. `/etc/hosts` lives at
/// `<dotfiles>/:etc/hosts`, which keeps it out of the way of home-relative
/// entries (those never start with `:`) and avoids needing the real
/// filesystem root when building the backup.
pub const ABSOLUTE_SENTINEL: &str = ":";

/// Where a dotfile rule's files originally lived.
///
/// Decided once when the rule is ingested and carried through walking and
/// copying, so destination paths are never re-derived from string prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOrigin {
    /// Path fragment relative to the user's home directory (e.g. `.vimrc`,
    /// `.config/nvim`).
    Home(PathBuf),
    /// Originally absolute path outside the home directory (e.g. `/etc/hosts`).
    Absolute(PathBuf),
}

impl PathOrigin {
    /// Classify a rule identifier. A leading separator marks an absolute
    /// path; everything else is home-relative.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier.strip_prefix('/') {
            Some(rest) => Self::Absolute(PathBuf::from("/").join(rest)),
            None => Self::Home(PathBuf::from(identifier)),
        }
    }

    /// Location of this rule's data inside the dotfiles backup root.
    ///
    /// Absolute origins are stored under the sentinel encoding:
    /// `/etc/hosts` maps to `<dots_root>/:etc/hosts`.
    pub fn backup_location(&self, dots_root: &Path) -> PathBuf {
        match self {
            Self::Home(rel) => dots_root.join(rel),
            Self::Absolute(abs) => {
                let encoded = match abs.strip_prefix("/") {
                    Ok(rest) => format!("{ABSOLUTE_SENTINEL}{}", rest.display()),
                    Err(_) => format!("{ABSOLUTE_SENTINEL}{}", abs.display()),
                };
                dots_root.join(encoded)
            }
        }
    }

    /// Root of this rule's destination on the live filesystem. Per-file
    /// destinations are this root plus the file's path relative to the
    /// rule's backup location.
    pub fn destination_root(&self, home: &Path) -> PathBuf {
        match self {
            Self::Home(rel) => home.join(rel),
            Self::Absolute(abs) => abs.clone(),
        }
    }
}

/// One concrete file to materialize: a source under the backup tree and its
/// destination on the live filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPair {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl CopyPair {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// Compute the destination for one file discovered under a rule's backup
/// location. `rule_root` is the rule's own backup location; `source` must
/// be a file at or beneath it.
pub fn destination_for(
    source: &Path,
    rule_root: &Path,
    origin: &PathOrigin,
    home: &Path,
) -> PathBuf {
    let dest_root = origin.destination_root(home);
    match source.strip_prefix(rule_root) {
        Ok(rel) if !rel.as_os_str().is_empty() => dest_root.join(rel),
        _ => dest_root,
    }
}
