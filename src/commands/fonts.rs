use anyhow::Result;
use std::path::Path;

use crate::backup::Backup;
use crate::config::expand_path;
use crate::report::Reporter;
use crate::restore::{default_fonts_dir, restore_fonts};

pub fn execute(
    backup: &Backup,
    fonts_dir: Option<&str>,
    home: &Path,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let fonts_dir = match fonts_dir {
        Some(dir) => expand_path(dir)?,
        None => default_fonts_dir(home),
    };

    restore_fonts(backup, &fonts_dir, dry_run, reporter)
}
