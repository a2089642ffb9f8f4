use anyhow::{anyhow, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::paths::CopyPair;
use crate::report::Reporter;

/// Failures accumulated while materializing a batch of copy pairs.
///
/// Owned by a single run and reported once at the end; individual failures
/// never abort the batch.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Distinct paths that hit a permission error. BTreeSet gives both the
    /// deduplication and the sorted order the final listing wants.
    permission_errors: BTreeSet<PathBuf>,
    /// Structural conflicts (destination parent is a file) that need manual
    /// remediation.
    conflicts: usize,
}

impl RestoreReport {
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    pub fn permission_errors(&self) -> &BTreeSet<PathBuf> {
        &self.permission_errors
    }

    /// Emit the end-of-batch summary.
    pub fn finish(&self, reporter: &mut dyn Reporter) {
        if self.conflicts > 0 {
            reporter.error(&format!(
                "{} error(s) require manual resolution; see diagnostics above.",
                self.conflicts
            ));
        }

        if !self.permission_errors.is_empty() {
            reporter.warn(&format!(
                "{} permission error(s) detected. Most of the time this is not a problem:\n\
                 git repos and some package managers keep read-only files that only their\n\
                 own tooling should rewrite. The following paths were affected:",
                self.permission_errors.len()
            ));
            let paths: Vec<String> = self
                .permission_errors
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            reporter.list(&paths);
        }
    }
}

/// Materializes copy pairs on the live filesystem, or reports what would
/// happen in dry-run mode without touching anything.
#[derive(Debug)]
pub struct CopyEngine {
    dry_run: bool,
    report: RestoreReport,
}

impl CopyEngine {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            report: RestoreReport::default(),
        }
    }

    pub fn report(&self) -> &RestoreReport {
        &self.report
    }

    /// Copy one pair, classifying the failures that must not stop the batch.
    ///
    /// Structural conflicts are counted, permission errors are accumulated,
    /// and a vanished source is reported; only unexpected io errors
    /// propagate and abort the entry point.
    pub fn copy_pair(&mut self, pair: &CopyPair, reporter: &mut dyn Reporter) -> Result<()> {
        if self.dry_run {
            reporter.dry_run_copy(&pair.source, &pair.dest);
            return Ok(());
        }

        if let Some(parent) = pair.dest.parent() {
            // A file sitting where the parent directory should be cannot be
            // fixed automatically without destroying data.
            if parent.is_file() {
                reporter.error(&format!(
                    "{} is a file, but restoring {} requires it to be a directory. \
                     Rename or move {} and rerun.",
                    parent.display(),
                    pair.dest.display(),
                    parent.display()
                ));
                self.report.conflicts += 1;
                return Ok(());
            }

            if let Err(err) = fs::create_dir_all(parent) {
                if err.kind() == io::ErrorKind::PermissionDenied {
                    self.report.permission_errors.insert(parent.to_path_buf());
                    return Ok(());
                }
                return Err(anyhow!(err).context(format!(
                    "Failed to create destination directory {}",
                    parent.display()
                )));
            }
        }

        match fs::copy(&pair.source, &pair.dest) {
            Ok(_) => {
                tracing::debug!(source = %pair.source.display(), dest = %pair.dest.display(), "copied");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                self.report.permission_errors.insert(pair.dest.clone());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                reporter.error(&format!(
                    "Source {} disappeared before it could be copied.",
                    pair.source.display()
                ));
                Ok(())
            }
            Err(err) => Err(anyhow!(err).context(format!(
                "Failed to copy {} to {}",
                pair.source.display(),
                pair.dest.display()
            ))),
        }
    }

    /// Run a whole batch, then emit the summary.
    pub fn copy_all(
        &mut self,
        pairs: &[CopyPair],
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        for pair in pairs {
            self.copy_pair(pair, reporter)?;
        }
        Ok(())
    }

    pub fn finish(self, reporter: &mut dyn Reporter) {
        self.report.finish(reporter);
    }
}
