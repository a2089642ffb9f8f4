use anyhow::{Context, Result};
use std::process::Command;

/// Decides whether a rule's reinstall condition holds.
///
/// Kept behind a trait so tests can stub the decision instead of spawning
/// shells, and so a hardened build could swap in a restricted evaluator.
pub trait ConditionEvaluator {
    fn evaluate(&self, condition: &str) -> Result<bool>;
}

/// Evaluates conditions by running them through `sh -c` and mapping the
/// exit status to a boolean, matching shell `if` semantics.
#[derive(Debug, Default)]
pub struct ShellEvaluator;

impl ConditionEvaluator for ShellEvaluator {
    fn evaluate(&self, condition: &str) -> Result<bool> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(condition)
            .status()
            .with_context(|| format!("Failed to run reinstall condition: {condition}"))?;
        Ok(status.success())
    }
}

/// Run a package-manager command line through the shell.
pub fn run_shell(command: &str) -> Result<()> {
    tracing::debug!(command, "running shell command");
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .with_context(|| format!("Failed to spawn: {command}"))?;

    if !status.success() {
        anyhow::bail!("Command exited with {status}: {command}");
    }
    Ok(())
}

/// Single-quote a path for splicing into a shell command line. This is the
/// only seam where a path crosses into shell text; everything else operates
/// on `Path` values directly.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
