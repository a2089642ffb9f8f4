use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a backup tree with one entry per category.
fn seed_backup(root: &Path) {
    let dots = root.join("dotfiles");
    fs::create_dir_all(dots.join(".config/git")).unwrap();
    fs::write(dots.join(".vimrc"), "set ruler").unwrap();
    fs::write(dots.join(".config/git/config"), "[user]").unwrap();

    let packages = root.join("packages");
    fs::create_dir_all(&packages).unwrap();
    fs::write(packages.join("brew_list.txt"), "ripgrep").unwrap();
    fs::write(packages.join("unknownmgr_list.txt"), "mystery").unwrap();

    let fonts = root.join("fonts");
    fs::create_dir_all(&fonts).unwrap();
    fs::write(fonts.join("Hack-Regular.ttf"), "font bytes").unwrap();

    let configs = root.join("configs");
    fs::create_dir_all(configs.join("sublime3")).unwrap();
    fs::write(configs.join("sublime3/prefs.json"), "{}").unwrap();
}

fn write_config(config_home: &Path, contents: &str) {
    let dir = config_home.join("rehome");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

fn rehome(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rehome").unwrap();
    cmd.env("XDG_CONFIG_HOME", temp.path().join("config-home"))
        .env("HOME", temp.path().join("home"));
    cmd
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("rehome").unwrap();
    cmd.arg("--help").assert().success();
}

#[test]
fn test_dotfiles_help() {
    let mut cmd = Command::cargo_bin("rehome").unwrap();
    cmd.arg("dotfiles")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("dotfiles"));
}

#[test]
#[serial]
fn test_dotfiles_restore() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    seed_backup(&backup);

    write_config(
        &temp.path().join("config-home"),
        r#"
[dotfiles.".vimrc"]

[dotfiles.".config/git"]
"#,
    );

    rehome(&temp)
        .arg("dotfiles")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .arg("--home")
        .arg(home.to_string_lossy().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Reinstalling dotfiles"))
        .stdout(predicate::str::contains("Dotfile reinstallation complete"));

    assert_eq!(fs::read_to_string(home.join(".vimrc")).unwrap(), "set ruler");
    assert_eq!(
        fs::read_to_string(home.join(".config/git/config")).unwrap(),
        "[user]"
    );
}

#[test]
#[serial]
fn test_dotfiles_condition_skips_rule() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    seed_backup(&backup);

    write_config(
        &temp.path().join("config-home"),
        r#"
[dotfiles.".vimrc"]
reinstall_condition = "false"

[dotfiles.".config/git"]
reinstall_condition = "true"
"#,
    );

    rehome(&temp)
        .arg("dotfiles")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .arg("--home")
        .arg(home.to_string_lossy().to_string())
        .assert()
        .success();

    assert!(!home.join(".vimrc").exists());
    assert!(home.join(".config/git/config").exists());
}

#[test]
#[serial]
fn test_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    seed_backup(&backup);

    write_config(
        &temp.path().join("config-home"),
        r#"
[dotfiles.".vimrc"]
"#,
    );

    rehome(&temp)
        .arg("dotfiles")
        .arg("--dry-run")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .arg("--home")
        .arg(home.to_string_lossy().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains(".vimrc"));

    assert!(!home.join(".vimrc").exists());
}

#[test]
#[serial]
fn test_empty_backup_fails_with_diagnostic() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    fs::create_dir_all(&backup).unwrap();

    rehome(&temp)
        .arg("dotfiles")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dotfile backup found"));
}

#[test]
#[serial]
fn test_packages_dry_run_recognizes_only_known_managers() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    seed_backup(&backup);

    rehome(&temp)
        .arg("packages")
        .arg("--dry-run")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("brew bundle install --file"))
        .stdout(predicate::str::contains("unknownmgr").not());
}

#[test]
#[serial]
fn test_fonts_restore_with_explicit_dir() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    seed_backup(&backup);
    let fonts_dir = temp.path().join("fonts-out");

    rehome(&temp)
        .arg("fonts")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .arg("--fonts-dir")
        .arg(fonts_dir.to_string_lossy().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("Font reinstallation complete"));

    assert!(fonts_dir.join("Hack-Regular.ttf").exists());
}

#[test]
#[serial]
fn test_configs_restore_from_mapping() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    seed_backup(&backup);
    let dest = temp.path().join("apps/sublime");

    write_config(
        &temp.path().join("config-home"),
        &format!(
            r#"
[config_mapping]
"{}" = "sublime3"
"#,
            dest.display()
        ),
    );

    rehome(&temp)
        .arg("configs")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .assert()
        .success();

    assert_eq!(fs::read_to_string(dest.join("prefs.json")).unwrap(), "{}");
}

#[test]
#[serial]
fn test_all_runs_phases_in_order() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    seed_backup(&backup);

    write_config(
        &temp.path().join("config-home"),
        r#"
[dotfiles.".vimrc"]
"#,
    );

    let assert = rehome(&temp)
        .arg("all")
        .arg("--dry-run")
        .arg("--backup-dir")
        .arg(backup.to_string_lossy().to_string())
        .arg("--home")
        .arg(home.to_string_lossy().to_string())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let dotfiles_at = stdout.find("Reinstalling dotfiles").unwrap();
    let packages_at = stdout.find("Reinstalling packages").unwrap();
    let fonts_at = stdout.find("Reinstalling fonts").unwrap();
    let configs_at = stdout.find("Reinstalling config files").unwrap();
    assert!(dotfiles_at < packages_at);
    assert!(packages_at < fonts_at);
    assert!(fonts_at < configs_at);

    // Dry run: nothing materialized.
    assert!(!home.join(".vimrc").exists());
}

#[test]
#[serial]
fn test_backup_dir_from_config_file() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup");
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    seed_backup(&backup);

    write_config(
        &temp.path().join("config-home"),
        &format!(
            r#"
backup_dir = "{}"

[dotfiles.".vimrc"]
"#,
            backup.display()
        ),
    );

    rehome(&temp)
        .arg("dotfiles")
        .arg("--home")
        .arg(home.to_string_lossy().to_string())
        .assert()
        .success();

    assert!(home.join(".vimrc").exists());
}
