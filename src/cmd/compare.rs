//! Compare command implementation
//!
//! Handles the `layout-parity compare` command which compares a subject
//! box description against a reference one and writes the result

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::artifact::ArtifactStore;
use crate::cmd::load_config;
use crate::comparator::{verify, ComparisonResult, RectDiff};
use crate::config::{ConfigOverrides, ParityConfig};
use crate::fmt::{format_px, icon, match_icon, RULER};
use crate::infra::FileSystem;
use crate::report::{LogSink, ReportEvent, ReportSink};

/// Compare two `*_box.json` files and write a comparison report
///
/// Exits successfully on a mismatch unless `fail_on_mismatch` is set.
///
/// # Examples
///
/// ```no_run
/// use layout_parity::cmd::compare::cmd_compare;
///
/// cmd_compare("subject_box.json", "reference_box.json", "comparison.json", None, false)?;
///
/// // Tighter tolerance, failing the run on any mismatch
/// cmd_compare("subject_box.json", "reference_box.json", "comparison.json", Some(0.25), true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The tolerance is negative or not finite
/// - Either input is missing, unreadable or malformed
/// - The output cannot be written
/// - `fail_on_mismatch` is set and either box does not match
pub fn cmd_compare(
    subject: &str,
    reference: &str,
    output: &str,
    tolerance: Option<f64>,
    fail_on_mismatch: bool,
) -> Result<()> {
    let config = load_config(ConfigOverrides {
        tolerance,
        ..ConfigOverrides::default()
    })?;

    println!("{} {} Box Comparison", icon(RULER), style("layout-parity").bold());
    println!();

    let result = compare_files(
        Path::new(subject),
        Path::new(reference),
        Path::new(output),
        &config,
        &ArtifactStore::new(),
        &LogSink,
    )?;

    present_result(&result, config.tolerance, output);

    if fail_on_mismatch && !result.is_match() {
        anyhow::bail!(
            "Layout mismatch: largest difference {} exceeds tolerance {}",
            format_px(result.max_diff()),
            format_px(config.tolerance)
        );
    }

    Ok(())
}

/// Load, compare and persist; the testable core of [`cmd_compare`]
pub fn compare_files<FS: FileSystem>(
    subject: &Path,
    reference: &Path,
    output: &Path,
    config: &ParityConfig,
    store: &ArtifactStore<FS>,
    sink: &dyn ReportSink,
) -> Result<ComparisonResult> {
    let tolerance = config.tolerance()?;

    let subject_box = store
        .load_box(subject)
        .context("Failed to load subject box")?;
    let reference_box = store
        .load_box(reference)
        .context("Failed to load reference box")?;

    let result = verify(&subject_box, &reference_box, tolerance, sink);

    store
        .write_json(output, &result)
        .context("Failed to write comparison result")?;
    sink.record(ReportEvent::ArtifactWritten {
        path: output.to_path_buf(),
    });

    Ok(result)
}

fn present_result(result: &ComparisonResult, tolerance: f64, output: &str) {
    println!("Comparison completed");
    println!("Content box match: {}", result.content_box_match);
    println!("Border box match: {}", result.border_box_match);
    println!();

    present_diff("Content box", result.content_box_match, &result.content_box_diff);
    present_diff("Border box", result.border_box_match, &result.border_box_diff);
    println!();
    println!(
        "   Tolerance: {}  Report: {}",
        style(format_px(tolerance)).cyan(),
        style(output).cyan()
    );
}

fn present_diff(label: &str, matched: bool, diff: &RectDiff) {
    println!(
        "{} {:<12} x {}  y {}  width {}  height {}",
        match_icon(matched),
        label,
        format_px(diff.x),
        format_px(diff.y),
        format_px(diff.width),
        format_px(diff.height)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorFormatter;
    use crate::extractor::extract;
    use crate::geometry::{EdgeValues, RawRect};
    use crate::report::MemorySink;
    use std::fs;
    use tempfile::TempDir;

    fn write_box(dir: &TempDir, name: &str, raw: RawRect) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let description = extract(
            raw,
            EdgeValues::uniform(5.0),
            EdgeValues::uniform(2.0),
            EdgeValues::default(),
        );
        fs::write(&path, serde_json::to_string(&description).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_compare_files_writes_result() {
        let temp = TempDir::new().unwrap();
        let subject = write_box(&temp, "subject_box.json", RawRect::new(0.0, 0.0, 100.0, 50.0));
        let reference =
            write_box(&temp, "reference_box.json", RawRect::new(0.5, 0.0, 100.5, 50.0));
        let output = temp.path().join("out").join("comparison.json");
        let sink = MemorySink::new();

        let result = compare_files(
            &subject,
            &reference,
            &output,
            &ParityConfig::default(),
            &ArtifactStore::new(),
            &sink,
        )
        .unwrap();

        assert!(result.is_match());
        let written: ComparisonResult =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, result);
        assert!(matches!(
            sink.events().last(),
            Some(ReportEvent::ArtifactWritten { .. })
        ));
    }

    #[test]
    fn test_compare_files_rejects_malformed_subject_without_output() {
        let temp = TempDir::new().unwrap();
        let subject = temp.path().join("subject_box.json");
        fs::write(&subject, r#"{"content_box": {"x": 0}}"#).unwrap();
        let reference = write_box(&temp, "reference_box.json", RawRect::new(0.0, 0.0, 1.0, 1.0));
        let output = temp.path().join("comparison.json");

        let err = compare_files(
            &subject,
            &reference,
            &output,
            &ParityConfig::default(),
            &ArtifactStore::new(),
            &MemorySink::new(),
        )
        .unwrap_err();

        assert_eq!(ErrorFormatter::exit_code(&err), 65);
        assert!(err.to_string().contains("subject"));
        assert!(!output.exists());
    }

    #[test]
    fn test_compare_files_rejects_negative_tolerance_before_reading() {
        let temp = TempDir::new().unwrap();
        let config = ParityConfig {
            tolerance: -0.1,
            ..ParityConfig::default()
        };

        let err = compare_files(
            &temp.path().join("missing_a.json"),
            &temp.path().join("missing_b.json"),
            &temp.path().join("comparison.json"),
            &config,
            &ArtifactStore::new(),
            &MemorySink::new(),
        )
        .unwrap_err();

        assert_eq!(ErrorFormatter::exit_code(&err), 64);
    }

    #[test]
    fn test_compare_files_missing_reference_is_io_error() {
        let temp = TempDir::new().unwrap();
        let subject = write_box(&temp, "subject_box.json", RawRect::new(0.0, 0.0, 1.0, 1.0));

        let err = compare_files(
            &subject,
            &temp.path().join("nonexistent_reference.json"),
            &temp.path().join("comparison.json"),
            &ParityConfig::default(),
            &ArtifactStore::new(),
            &MemorySink::new(),
        )
        .unwrap_err();

        assert_eq!(ErrorFormatter::exit_code(&err), 74);
        assert!(err.to_string().contains("reference"));
    }
}
