use clap::{Parser, Subcommand};

/// rehome - restore your personal environment from a backup tree
///
/// rehome reads a backup directory produced by a previous backup run
/// (dotfiles, package lists, fonts, and application config files) and
/// copies everything back to where it originally lived. Every subcommand
/// supports `--dry-run` to preview the work without touching the system.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report intended actions without writing files or running commands
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Backup tree root (overrides `backup_dir` from the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub backup_dir: Option<String>,

    /// Destination home directory (defaults to the current user's home)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Restore dotfiles to the home directory and their original absolute
    /// locations
    Dotfiles,

    /// Restore fonts into the platform fonts directory
    Fonts {
        /// Install fonts here instead of the platform default
        #[arg(long, value_name = "DIR")]
        fonts_dir: Option<String>,
    },

    /// Restore application config files per the config_mapping entries
    Configs,

    /// Reinstall packages from the saved package manager lists
    Packages,

    /// Restore everything: dotfiles, packages, fonts, then configs
    All,
}
