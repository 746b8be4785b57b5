//! Completions command implementation
//!
//! Handles the `layout-parity completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts for `cmd` on stdout
///
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// layout-parity completions bash > /etc/bash_completion.d/layout-parity
///
/// # Zsh
/// layout-parity completions zsh > ~/.zfunc/_layout-parity
///
/// # Fish
/// layout-parity completions fish > ~/.config/fish/completions/layout-parity.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Write completion script for `cmd` to `out`
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
