//! Diff-snapshots command implementation
//!
//! Handles the `layout-parity diff-snapshots` command which pairs the
//! elements of two rect snapshots and compares their page rectangles

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::artifact::ArtifactStore;
use crate::cmd::load_config;
use crate::config::{ConfigOverrides, ParityConfig};
use crate::fmt::{format_px, icon, CHART, CHECKMARK, CROSSMARK, WARNING};
use crate::infra::FileSystem;
use crate::report::{LogSink, ReportEvent, ReportSink};
use crate::snapshot::{diff_snapshots, SnapshotDiff};

/// Compare two rect snapshots element by element
///
/// # Examples
///
/// ```no_run
/// use layout_parity::cmd::diff_snapshots::cmd_diff_snapshots;
///
/// cmd_diff_snapshots("subject-rects.json", "element-rects.json", None, Some("rect-diff.json"), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_diff_snapshots(
    subject: &str,
    reference: &str,
    tolerance: Option<f64>,
    output: Option<&str>,
    fail_on_mismatch: bool,
) -> Result<()> {
    let config = load_config(ConfigOverrides {
        tolerance,
        ..ConfigOverrides::default()
    })?;

    println!("{} {} Snapshot Diff", icon(CHART), style("layout-parity").bold());
    println!();

    let diff = diff_files(
        Path::new(subject),
        Path::new(reference),
        output.map(Path::new),
        &config,
        &ArtifactStore::new(),
        &LogSink,
    )?;

    present_diff(&diff);

    if fail_on_mismatch && !diff.is_match() {
        anyhow::bail!(
            "{} of {} paired element(s) differ beyond tolerance",
            diff.elements.len() - diff.matched_count(),
            diff.elements.len()
        );
    }

    Ok(())
}

/// Load, pair, compare and optionally persist; the testable core of
/// [`cmd_diff_snapshots`]
pub fn diff_files<FS: FileSystem>(
    subject: &Path,
    reference: &Path,
    output: Option<&Path>,
    config: &ParityConfig,
    store: &ArtifactStore<FS>,
    sink: &dyn ReportSink,
) -> Result<SnapshotDiff> {
    let tolerance = config.tolerance()?;

    let subject_records = store
        .load_snapshot(subject)
        .context("Failed to load subject snapshot")?;
    let reference_records = store
        .load_snapshot(reference)
        .context("Failed to load reference snapshot")?;

    let diff = diff_snapshots(&subject_records, &reference_records, tolerance.value());

    if let Some(output) = output {
        store
            .write_json(output, &diff)
            .context("Failed to write snapshot diff")?;
        sink.record(ReportEvent::ArtifactWritten {
            path: output.to_path_buf(),
        });
    }

    Ok(diff)
}

fn present_diff(diff: &SnapshotDiff) {
    println!(
        "   Paired: {}  Matched: {}  Tolerance: {}",
        style(diff.elements.len()).bold(),
        style(diff.matched_count()).green(),
        format_px(diff.tolerance)
    );
    println!();

    for element in diff.mismatches() {
        println!(
            "{} {}  dx {}  dy {}  dw {}  dh {}",
            icon(CROSSMARK),
            style(&element.key).bold(),
            format_px(element.diff.x),
            format_px(element.diff.y),
            format_px(element.diff.width),
            format_px(element.diff.height)
        );
    }

    for key in &diff.only_in_subject {
        println!("{} only in subject: {}", icon(WARNING), style(key).yellow());
    }
    for key in &diff.only_in_reference {
        println!("{} only in reference: {}", icon(WARNING), style(key).yellow());
    }

    if diff.is_match() {
        println!("{} All elements match", icon(CHECKMARK));
    }
}
