//! Inspect command implementation
//!
//! Handles the `layout-parity inspect` command which looks up elements in a
//! snapshot file and prints their geometry

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::artifact::ArtifactStore;
use crate::fmt::{format_px, icon, match_icon, INFO, MICROSCOPE};
use crate::infra::FileSystem;
use crate::snapshot::{ElementQuery, SnapshotRecord};

/// Default number of matches printed
pub const DEFAULT_LIMIT: usize = 10;

/// Print snapshot records matching `query`
///
/// # Examples
///
/// ```no_run
/// use layout_parity::cmd::inspect::cmd_inspect;
/// use layout_parity::snapshot::ElementQuery;
///
/// cmd_inspect("element-rects.json", &ElementQuery::new().tag("div").class("block-test"), 10)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_inspect(snapshot: &str, query: &ElementQuery, limit: usize) -> Result<()> {
    let records = inspect_file(Path::new(snapshot), query, &ArtifactStore::new())?;

    println!(
        "{} {} Found {} matching element(s) in {}",
        icon(MICROSCOPE),
        style("layout-parity").bold(),
        style(records.len()).bold(),
        style(snapshot).cyan()
    );
    println!();

    for record in records.iter().take(limit) {
        present_record(record);
    }

    if records.len() > limit {
        println!(
            "{}  {} more not shown (use --limit to see more)",
            icon(INFO),
            records.len() - limit
        );
    }

    Ok(())
}

/// Load a snapshot and select matching records; the testable core of
/// [`cmd_inspect`]
pub fn inspect_file<FS: FileSystem>(
    snapshot: &Path,
    query: &ElementQuery,
    store: &ArtifactStore<FS>,
) -> Result<Vec<SnapshotRecord>> {
    let records = store
        .load_snapshot(snapshot)
        .context("Failed to load snapshot")?;
    Ok(query.select(&records).cloned().collect())
}

fn present_record(record: &SnapshotRecord) {
    let element = &record.element;
    println!(
        "[{}] {}",
        element.index,
        style(element.label()).bold().cyan()
    );
    if !element.text_content.is_empty() {
        println!("     text: {}", style(&element.text_content).dim());
    }
    if let Some(rect) = &record.rect {
        println!(
            "     x: {}, y: {}",
            format_px(rect.x),
            format_px(rect.y)
        );
        println!(
            "     width: {}, height: {}",
            format_px(rect.width),
            format_px(rect.height)
        );
    }
    if let Some(visible) = element.is_visible {
        println!("     visible: {}", match_icon(visible));
    }
    if let Some(key_styles) = &element.key_styles {
        println!(
            "     width: {}, height: {}, padding-top: {}, border-top-width: {}",
            key_styles.width, key_styles.height, key_styles.padding_top, key_styles.border_top_width
        );
    }
    println!();
}
