use anstyle::{AnsiColor, Style};
use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::path::Path;

const STATUS_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Section,
    Info,
    Warn,
    Error,
    DryRun,
}

fn supports_color(stderr: bool) -> bool {
    let interactive = if stderr {
        io::stderr().is_terminal()
    } else {
        io::stdout().is_terminal()
    };
    interactive && std::env::var_os("NO_COLOR").is_none()
}

fn style_for(kind: StatusKind) -> Style {
    let style = Style::new().bold();
    match kind {
        StatusKind::Section => style.fg_color(Some(AnsiColor::Blue.into())),
        StatusKind::Info => style.fg_color(Some(AnsiColor::Cyan.into())),
        StatusKind::Warn | StatusKind::DryRun => style.fg_color(Some(AnsiColor::Yellow.into())),
        StatusKind::Error => style.fg_color(Some(AnsiColor::Red.into())),
    }
}

fn write_status(kind: StatusKind, label: &str, message: &str) {
    let stderr = matches!(kind, StatusKind::Warn | StatusKind::Error);
    let use_color = supports_color(stderr);
    let mut handle: Box<dyn Write> = if stderr {
        Box::new(io::stderr().lock())
    } else {
        Box::new(io::stdout().lock())
    };

    let padded_label = if label.is_empty() {
        " ".repeat(STATUS_WIDTH)
    } else {
        format!("{:>width$}", label, width = STATUS_WIDTH)
    };

    let (prefix, suffix) = if use_color {
        let style = style_for(kind);
        (style.render().to_string(), style.render_reset().to_string())
    } else {
        (String::new(), String::new())
    };

    for (idx, line) in message.split('\n').enumerate() {
        if idx == 0 {
            let _ = writeln!(handle, "{prefix}{padded_label}{suffix} {line}");
        } else {
            let _ = writeln!(handle, "{:>width$} {line}", "", width = STATUS_WIDTH);
        }
    }
    let _ = handle.flush();
}

/// Sink for all user-facing restore output.
///
/// Restore routines report through this trait instead of printing directly
/// so tests can capture exactly what a run would have said.
pub trait Reporter {
    /// Banner marking the start or end of a restore phase.
    fn section(&mut self, title: &str);

    /// Informational progress line.
    fn info(&mut self, message: &str);

    /// Non-fatal problem worth the user's attention.
    fn warn(&mut self, message: &str);

    /// Failure diagnostic (the run may still continue).
    fn error(&mut self, message: &str);

    /// Itemized listing, e.g. the paths that hit permission errors.
    fn list(&mut self, items: &[String]);

    /// A copy that would happen outside dry-run mode.
    fn dry_run_copy(&mut self, source: &Path, dest: &Path);

    /// A shell command that would run outside dry-run mode.
    fn dry_run_command(&mut self, command: &str);
}

/// Console reporter with the status-line layout used by the CLI.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn section(&mut self, title: &str) {
        write_status(StatusKind::Section, "Restore", title);
    }

    fn info(&mut self, message: &str) {
        write_status(StatusKind::Info, "Info", message);
    }

    fn warn(&mut self, message: &str) {
        write_status(StatusKind::Warn, "Warning", message);
    }

    fn error(&mut self, message: &str) {
        write_status(StatusKind::Error, "Error", message);
    }

    fn list(&mut self, items: &[String]) {
        for item in items {
            write_status(StatusKind::Info, "", item);
        }
    }

    fn dry_run_copy(&mut self, source: &Path, dest: &Path) {
        write_status(
            StatusKind::DryRun,
            "Dry run",
            &format!("{} -> {}", source.display(), dest.display()),
        );
    }

    fn dry_run_command(&mut self, command: &str) {
        write_status(StatusKind::DryRun, "Dry run", &format!("$ {command}"));
    }
}

/// Records everything reported; used by unit tests to assert on output.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub sections: Vec<String>,
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub listed: Vec<String>,
    pub dry_run_copies: Vec<(std::path::PathBuf, std::path::PathBuf)>,
    pub dry_run_commands: Vec<String>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn section(&mut self, title: &str) {
        self.sections.push(title.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn list(&mut self, items: &[String]) {
        self.listed.extend(items.iter().cloned());
    }

    fn dry_run_copy(&mut self, source: &Path, dest: &Path) {
        self.dry_run_copies
            .push((source.to_path_buf(), dest.to_path_buf()));
    }

    fn dry_run_command(&mut self, command: &str) {
        self.dry_run_commands.push(command.to_string());
    }
}
