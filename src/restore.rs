use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::backup::{Backup, BackupPath, EmptyBackup};
use crate::config::{expand_path, RestoreConfig};
use crate::copy::CopyEngine;
use crate::exec::ConditionEvaluator;
use crate::packages;
use crate::paths::{destination_for, CopyPair, PathOrigin};
use crate::report::Reporter;
use crate::walker::collect_files;

/// Reinstall all dotfiles by copying them from the backup tree to paths
/// relative to `home`, or to their original absolute locations.
pub fn restore_dotfiles(
    backup: &Backup,
    config: &RestoreConfig,
    home: &Path,
    dry_run: bool,
    evaluator: &dyn ConditionEvaluator,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let dots_root = backup.ensure_not_empty(BackupPath::Dotfiles)?;
    reporter.section("Reinstalling dotfiles");

    let mut pairs = Vec::new();
    for (identifier, rule) in &config.dotfiles {
        if let Some(condition) = &rule.reinstall_condition {
            if !evaluator.evaluate(condition)? {
                tracing::debug!(identifier = %identifier, "reinstall condition failed, skipping");
                continue;
            }
        }

        let origin = PathOrigin::from_identifier(identifier);
        let rule_root = origin.backup_location(&dots_root);
        for file in collect_files(&rule_root)? {
            let dest = destination_for(&file, &rule_root, &origin, home);
            pairs.push(CopyPair::new(file, dest));
        }
    }

    let mut engine = CopyEngine::new(dry_run);
    engine.copy_all(&pairs, reporter)?;
    engine.finish(reporter);

    reporter.section("Dotfile reinstallation complete");
    Ok(())
}

/// Reinstall every font file from the backup into `fonts_dir`.
pub fn restore_fonts(
    backup: &Backup,
    fonts_dir: &Path,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let fonts_root = backup.ensure_not_empty(BackupPath::Fonts)?;
    reporter.section("Reinstalling fonts");

    let mut engine = CopyEngine::new(dry_run);
    for font in collect_files(&fonts_root)? {
        let Some(name) = font.file_name() else {
            continue;
        };
        let pair = CopyPair::new(&font, fonts_dir.join(name));
        engine.copy_pair(&pair, reporter)?;
    }
    engine.finish(reporter);

    reporter.section("Font reinstallation complete");
    Ok(())
}

/// Platform fonts directory: `~/Library/Fonts` on macOS, the XDG data
/// fonts directory elsewhere.
pub fn default_fonts_dir(home: &Path) -> PathBuf {
    if cfg!(target_os = "macos") {
        home.join("Library").join("Fonts")
    } else {
        std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local").join("share"))
            .join("fonts")
    }
}

/// Reinstall application config files and directories according to the
/// `config_mapping` entries.
pub fn restore_configs(
    backup: &Backup,
    config: &RestoreConfig,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let configs_root = backup.ensure_not_empty(BackupPath::Configs)?;
    reporter.section("Reinstalling config files");

    let mut engine = CopyEngine::new(dry_run);
    for (dest_raw, backup_loc) in &config.config_mapping {
        let dest_root = expand_path(dest_raw)?;
        let source_root = configs_root.join(backup_loc);

        for file in collect_files(&source_root)? {
            let dest = match file.strip_prefix(&source_root) {
                Ok(rel) if !rel.as_os_str().is_empty() => dest_root.join(rel),
                _ => dest_root.clone(),
            };
            engine.copy_pair(&CopyPair::new(&file, dest), reporter)?;
        }
    }
    engine.finish(reporter);

    reporter.section("Config reinstallation complete");
    Ok(())
}

/// Reinstall packages from the saved manager lists.
pub fn restore_packages(backup: &Backup, dry_run: bool, reporter: &mut dyn Reporter) -> Result<()> {
    let packages_root = backup.ensure_not_empty(BackupPath::Packages)?;
    reporter.section("Reinstalling packages");

    packages::reinstall_all(&packages_root, dry_run, reporter)?;

    reporter.section("Package reinstallation complete");
    Ok(())
}

/// Run every restore phase in fixed order: dotfiles, packages, fonts,
/// configs. A phase with nothing backed up is reported and skipped; the
/// remaining phases still run.
pub fn restore_all(
    backup: &Backup,
    config: &RestoreConfig,
    home: &Path,
    dry_run: bool,
    evaluator: &dyn ConditionEvaluator,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let fonts_dir = default_fonts_dir(home);

    run_phase(
        restore_dotfiles(backup, config, home, dry_run, evaluator, reporter),
        reporter,
    )?;
    run_phase(restore_packages(backup, dry_run, reporter), reporter)?;
    run_phase(restore_fonts(backup, &fonts_dir, dry_run, reporter), reporter)?;
    run_phase(restore_configs(backup, config, dry_run, reporter), reporter)?;

    Ok(())
}

/// An empty backup category only terminates its own phase; anything else
/// aborts the run.
fn run_phase(result: Result<()>, reporter: &mut dyn Reporter) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.downcast_ref::<EmptyBackup>().is_some() => {
            reporter.warn(&format!("{err}"));
            Ok(())
        }
        Err(err) => Err(err),
    }
}
