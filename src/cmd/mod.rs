//! Command handlers for layout-parity CLI
//!
//! Each submodule handles a specific CLI command. Handlers load
//! `.layout-parity.toml` from the working directory, apply command-line
//! overrides and report through a [`LogSink`](crate::report::LogSink).

pub mod compare;
pub mod completions;
pub mod diff_snapshots;
pub mod extract;
pub mod import_dump;
pub mod init;
pub mod inspect;
pub mod snapshot;

// Re-export command functions for convenient access
pub use compare::cmd_compare;
pub use completions::cmd_completions;
pub use diff_snapshots::cmd_diff_snapshots;
pub use extract::{cmd_extract, Target};
pub use import_dump::cmd_import_dump;
pub use init::cmd_init;
pub use inspect::cmd_inspect;
pub use snapshot::cmd_snapshot;

use crate::config::{ConfigLoader, ConfigOverrides, ParityConfig};
use anyhow::{Context, Result};
use std::env;

/// Load the working directory's configuration with overrides applied
pub(crate) fn load_config(overrides: ConfigOverrides) -> Result<ParityConfig> {
    let project_root = env::current_dir().context("Failed to determine working directory")?;
    Ok(ConfigLoader::load(&project_root)?.with_overrides(overrides))
}
