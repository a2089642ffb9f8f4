use anyhow::Result;
use std::path::Path;

use crate::backup::Backup;
use crate::config::RestoreConfig;
use crate::exec::ShellEvaluator;
use crate::report::Reporter;
use crate::restore::restore_all;

pub fn execute(
    backup: &Backup,
    config: &RestoreConfig,
    home: &Path,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    restore_all(backup, config, home, dry_run, &ShellEvaluator, reporter)
}
