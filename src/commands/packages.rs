use anyhow::Result;

use crate::backup::Backup;
use crate::report::Reporter;
use crate::restore::restore_packages;

pub fn execute(backup: &Backup, dry_run: bool, reporter: &mut dyn Reporter) -> Result<()> {
    restore_packages(backup, dry_run, reporter)
}
