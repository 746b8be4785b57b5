//! Init command implementation
//!
//! Handles the `layout-parity init` command which writes a default
//! configuration file

use anyhow::{Context, Result};
use console::style;
use std::env;
use std::path::Path;

use crate::config::{self, ParityConfig};
use crate::fmt::{icon, CHECKMARK, INFO, SPARKLES, WARNING};

/// Write `.layout-parity.toml` with default values in the working directory
///
/// An existing file is left untouched.
///
/// # Examples
///
/// ```no_run
/// use layout_parity::cmd::init::cmd_init;
///
/// cmd_init()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init() -> Result<()> {
    let project_root = env::current_dir().context("Failed to determine working directory")?;

    println!(
        "{} {} Initializing configuration",
        icon(SPARKLES),
        style("layout-parity init").bold()
    );
    println!();

    if !init_in(&project_root)? {
        println!(
            "{} Config file already exists: {}",
            icon(WARNING),
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    let defaults = ParityConfig::default();
    println!(
        "{} Created {}",
        icon(CHECKMARK),
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!();
    println!("{}  Defaults:", icon(INFO));
    println!("   tolerance = {}", style(defaults.tolerance).green());
    println!("   text-limit = {}", style(defaults.text_limit).green());
    println!(
        "   skip-tags = {}",
        style(defaults.skip_tags.join(", ")).green()
    );

    Ok(())
}

/// Write the default configuration unless one exists; returns whether a file
/// was created
pub fn init_in(project_root: &Path) -> Result<bool> {
    if config::ConfigLoader::exists(project_root) {
        return Ok(false);
    }
    config::ConfigLoader::save(&ParityConfig::default(), project_root)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_loadable_defaults() {
        let temp = TempDir::new().unwrap();

        assert!(init_in(temp.path()).unwrap());

        let loaded = config::ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(loaded, ParityConfig::default());
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(config::CONFIG_FILE_NAME);
        fs::write(&path, "tolerance = 0.5\n").unwrap();

        assert!(!init_in(temp.path()).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "tolerance = 0.5\n");
    }
}
