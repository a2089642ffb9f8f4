use anyhow::Result;

use crate::backup::Backup;
use crate::config::RestoreConfig;
use crate::report::Reporter;
use crate::restore::restore_configs;

pub fn execute(
    backup: &Backup,
    config: &RestoreConfig,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    restore_configs(backup, config, dry_run, reporter)
}
