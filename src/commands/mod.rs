use anyhow::Result;

use crate::backup::{resolve_home, Backup};
use crate::cli::{Cli, Commands};
use crate::config::{config_file, RestoreConfig};
use crate::report::ConsoleReporter;

mod all;
mod configs;
mod dotfiles;
mod fonts;
mod packages;

pub fn execute(cli: Cli) -> Result<()> {
    let config = RestoreConfig::load(&config_file()?)?;
    let backup = Backup::locate(cli.backup_dir.as_deref(), &config)?;
    let home = resolve_home(cli.home.as_deref())?;
    let mut reporter = ConsoleReporter;

    match cli.command {
        Commands::Dotfiles => {
            dotfiles::execute(&backup, &config, &home, cli.dry_run, &mut reporter)
        }

        Commands::Fonts { fonts_dir } => fonts::execute(
            &backup,
            fonts_dir.as_deref(),
            &home,
            cli.dry_run,
            &mut reporter,
        ),

        Commands::Configs => configs::execute(&backup, &config, cli.dry_run, &mut reporter),

        Commands::Packages => packages::execute(&backup, cli.dry_run, &mut reporter),

        Commands::All => all::execute(&backup, &config, &home, cli.dry_run, &mut reporter),
    }
}
