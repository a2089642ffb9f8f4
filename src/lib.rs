// Public API
pub mod cli;
pub mod commands;

// Core domain types
mod backup;
mod config;
mod copy;
mod exec;
mod packages;
mod paths;
mod report;
mod restore;
mod walker;

// Re-export main types
pub use backup::{Backup, BackupPath, EmptyBackup};
pub use config::{DotfileRule, RestoreConfig};
pub use copy::{CopyEngine, RestoreReport};
pub use exec::{ConditionEvaluator, ShellEvaluator};
pub use paths::{CopyPair, PathOrigin};
pub use report::{ConsoleReporter, Reporter};
