//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Proper exit codes for CI/CD
//!
//! Geometric anomalies are deliberately absent here: a content box with
//! negative size is an advisory annotation on
//! [`BoxDescription`](crate::extractor::BoxDescription), never an error.
//!
//! # Examples
//!
//! ```
//! use layout_parity::error::ParityError;
//!
//! let err = ParityError::NoElementFound {
//!     target: "first child of <body>".to_string(),
//! };
//! assert_eq!(err.exit_code(), 66);
//! assert!(err.suggestion().is_some());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by extraction, comparison and artifact handling
#[derive(Error, Debug)]
pub enum ParityError {
    /// Required input was not supplied
    #[error("Missing required input: {what}")]
    Usage {
        /// What was missing
        what: String,
    },

    /// A box-description or snapshot artifact is missing an expected field or
    /// is not valid JSON
    #[error("Malformed input in {}", path.display())]
    MalformedInput {
        /// Path of the offending artifact
        path: PathBuf,
        #[source]
        /// Parse/validation error
        source: serde_json::Error,
    },

    /// The element to extract does not exist in the captured document
    #[error("No element found: {target}")]
    NoElementFound {
        /// Description of the element that was looked for
        target: String,
    },

    /// Tolerance must be finite and non-negative
    #[error("Invalid tolerance: {value}")]
    InvalidTolerance {
        /// Rejected value
        value: f64,
    },

    /// Configuration file holds an invalid value
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong
        message: String,
    },

    /// I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl ParityError {
    /// Actionable suggestion for resolving this error, if one exists
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Usage { .. } => {
                Some("Run 'layout-parity --help' to see required arguments".to_string())
            }
            Self::MalformedInput { path, .. } => Some(format!(
                "Regenerate {} with the capture step; every box needs content_box, border_box, padding, border and margin with numeric fields",
                path.display()
            )),
            Self::NoElementFound { .. } => Some(
                "Check that the captured document contains the target element (a zero-size element still counts as found)"
                    .to_string(),
            ),
            Self::InvalidTolerance { .. } => {
                Some("Use a finite tolerance >= 0, e.g. --tolerance 1.0".to_string())
            }
            Self::InvalidConfig { .. } => Some(
                "Fix .layout-parity.toml or regenerate it with 'layout-parity init'".to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Exit code following sysexits.h conventions
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 64,            // EX_USAGE
            Self::MalformedInput { .. } => 65,   // EX_DATAERR
            Self::NoElementFound { .. } => 66,   // EX_NOINPUT
            Self::InvalidTolerance { .. } => 64, // EX_USAGE
            Self::InvalidConfig { .. } => 78,    // EX_CONFIG
            Self::Io { .. } => 74,               // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(parity_error) = Self::find_parity_error(error) {
            if let Some(suggestion) = parity_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Exit code for an error, 1 when it carries no [`ParityError`]
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find_parity_error(error)
            .map(ParityError::exit_code)
            .unwrap_or(1)
    }

    // Handlers wrap library errors with context, so look through the chain.
    fn find_parity_error(error: &anyhow::Error) -> Option<&ParityError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<ParityError>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn malformed() -> ParityError {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        ParityError::MalformedInput {
            path: PathBuf::from("subject_box.json"),
            source,
        }
    }

    #[test]
    fn test_exit_codes_follow_conventions() {
        assert_eq!(
            ParityError::Usage {
                what: "output path".to_string()
            }
            .exit_code(),
            64
        );
        assert_eq!(malformed().exit_code(), 65);
        assert_eq!(
            ParityError::NoElementFound {
                target: "#main".to_string()
            }
            .exit_code(),
            66
        );
        assert_eq!(ParityError::InvalidTolerance { value: -1.0 }.exit_code(), 64);
        assert_eq!(
            ParityError::InvalidConfig {
                message: "bad".to_string()
            }
            .exit_code(),
            78
        );
    }

    #[test]
    fn test_malformed_input_mentions_path() {
        let err = malformed();
        assert!(err.to_string().contains("subject_box.json"));
        assert!(err.suggestion().unwrap().contains("subject_box.json"));
    }

    #[test]
    fn test_formatter_prints_parse_error_once() {
        let parse_message = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .to_string();
        let err = anyhow::Error::new(malformed());

        let formatted = ErrorFormatter::format(&err);
        assert_eq!(formatted.matches(&parse_message).count(), 1);
        assert!(formatted.contains("caused by:"));
    }

    #[test]
    fn test_formatter_finds_parity_error_behind_context() {
        let result: anyhow::Result<()> = Err(ParityError::NoElementFound {
            target: "#hero".to_string(),
        })
        .context("Failed to extract box");
        let err = result.unwrap_err();

        assert_eq!(ErrorFormatter::exit_code(&err), 66);
        let formatted = ErrorFormatter::format(&err);
        assert!(formatted.contains("Failed to extract box"));
        assert!(formatted.contains("No element found: #hero"));
        assert!(formatted.contains("help:"));
    }

    #[test]
    fn test_formatter_defaults_exit_code_for_foreign_errors() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
        assert!(!ErrorFormatter::format(&err).contains("help:"));
    }
}
