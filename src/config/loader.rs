//! Configuration file loading and saving

use super::file::{ParityConfig, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .layout-parity.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use layout_parity::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Comparing with tolerance {}", config.tolerance);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ParityConfig> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ParityConfig> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(ParityConfig::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .layout-parity.toml");
            }
        };

        let config: ParityConfig =
            toml_edit::de::from_str(&contents).context("Failed to parse .layout-parity.toml")?;

        config
            .validate()
            .context("Invalid .layout-parity.toml")?;

        Ok(config)
    }

    /// Save config to .layout-parity.toml in the given directory
    pub fn save(config: &ParityConfig, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ParityConfig,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .context("Failed to write .layout-parity.toml")?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        Self::exists_with_fs(project_root, &RealFileSystem)
    }

    /// Check for the config file with a custom filesystem implementation
    pub fn exists_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> bool {
        fs.exists(&project_root.join(CONFIG_FILE_NAME))
    }
}
