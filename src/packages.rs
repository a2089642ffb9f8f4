use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::exec::{run_shell, shell_quote};
use crate::report::Reporter;

/// Package managers whose saved lists this tool can reinstall from.
pub const KNOWN_MANAGERS: &[&str] = &[
    "gem", "cargo", "npm", "pip", "pip3", "brew", "vscode", "macports",
];

/// Scan the packages backup directory for saved install lists and return
/// the recognized manager names, sorted.
///
/// The manager is the list-file name's leading token, up to the first `_`
/// or `-`; unrecognized files are ignored without complaint.
pub fn detect_managers(packages_dir: &Path) -> Result<BTreeSet<String>> {
    let mut managers = BTreeSet::new();

    for entry in fs::read_dir(packages_dir)
        .with_context(|| format!("Failed to read {}", packages_dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };

        let token = name
            .split(['_', '-'])
            .next()
            .unwrap_or(name);
        if KNOWN_MANAGERS.contains(&token) {
            managers.insert(token.to_string());
        }
    }

    Ok(managers)
}

fn list_file(packages_dir: &Path, manager: &str) -> String {
    shell_quote(
        &packages_dir
            .join(format!("{manager}_list.txt"))
            .display()
            .to_string(),
    )
}

/// Reinstall every manager's saved packages. Each manager runs its fixed
/// command template; one failing manager is reported and does not stop the
/// others.
pub fn reinstall_all(
    packages_dir: &Path,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let managers = detect_managers(packages_dir)?;

    reporter.info("Package manager backups found:");
    let found: Vec<String> = managers.iter().cloned().collect();
    reporter.list(&found);

    for manager in &managers {
        reinstall_manager(manager, packages_dir, dry_run, reporter)?;
    }

    Ok(())
}

fn reinstall_manager(
    manager: &str,
    packages_dir: &Path,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let command = match manager {
        "brew" => Some(format!(
            "brew bundle install --file {}",
            list_file(packages_dir, "brew")
        )),
        "npm" => Some(format!(
            "cat {} | xargs npm install -g",
            list_file(packages_dir, "npm")
        )),
        "pip" => Some(format!("pip install -r {}", list_file(packages_dir, "pip"))),
        "pip3" => Some(format!(
            "pip3 install -r {}",
            list_file(packages_dir, "pip3")
        )),
        "gem" => Some(format!(
            "cat {} | xargs -L 1 gem install",
            list_file(packages_dir, "gem")
        )),
        "cargo" => Some(format!(
            "cat {} | xargs -L 1 cargo install",
            list_file(packages_dir, "cargo")
        )),
        "vscode" => {
            reinstall_vscode_extensions(packages_dir, dry_run, reporter)?;
            None
        }
        "macports" => {
            reporter.warn("Macports reinstallation is not supported; reinstall ports manually.");
            None
        }
        other => {
            // detect_managers only yields known names.
            tracing::debug!(manager = other, "skipping unknown manager");
            None
        }
    };

    if let Some(command) = command {
        reporter.info(&format!("Reinstalling {manager} packages"));
        run_command(&command, dry_run, reporter);
    }

    Ok(())
}

/// VS Code extensions install one at a time rather than through a single
/// list-consuming command.
fn reinstall_vscode_extensions(
    packages_dir: &Path,
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let list = packages_dir.join("vscode_list.txt");
    let contents = fs::read_to_string(&list)
        .with_context(|| format!("Failed to read {}", list.display()))?;

    reporter.info("Reinstalling vscode extensions");
    for extension in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let command = format!("code --install-extension {extension}");
        run_command(&command, dry_run, reporter);
    }

    Ok(())
}

fn run_command(command: &str, dry_run: bool, reporter: &mut dyn Reporter) {
    if dry_run {
        reporter.dry_run_command(command);
        return;
    }

    if let Err(err) = run_shell(command) {
        reporter.error(&format!("{err:#}"));
    }
}
