//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Assertion helpers for pixel comparisons
//! - Fixture files for captured documents, box descriptions and dumps
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::{assertions::*, fixtures};
//!
//! fn test_extraction() {
//!     let workspace = fixtures::Workspace::new().unwrap();
//!     let doc = workspace.write("page.json", fixtures::DOCUMENT).unwrap();
//!     // ...
//! }
//! ```

use assert_cmd::Command;

pub mod assertions;
pub mod fixtures;

/// Helper to get the layout-parity binary command
#[allow(dead_code)]
pub fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_layout-parity"))
}
