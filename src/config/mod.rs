//! Configuration for layout-parity
//!
//! This module provides:
//! - .layout-parity.toml config file support
//! - Validation of configured values
//! - Command-line override resolution

pub mod file;
pub mod loader;

pub use file::{ConfigOverrides, ParityConfig, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
