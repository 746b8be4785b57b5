//! Import-dump command implementation
//!
//! Handles the `layout-parity import-dump` command which converts a subject
//! engine's textual layout dump into JSON content boxes

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::artifact::ArtifactStore;
use crate::fmt::{icon, CHECKMARK, WARNING};
use crate::infra::FileSystem;
use crate::report::{LogSink, ReportEvent, ReportSink};
use crate::snapshot::{parse_dump, DumpedBox};

/// Parse a layout dump and write its content boxes as JSON
///
/// # Examples
///
/// ```no_run
/// use layout_parity::cmd::import_dump::cmd_import_dump;
///
/// cmd_import_dump("engine_output.txt", "subject_boxes.json")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_import_dump(dump: &str, output: &str) -> Result<()> {
    let boxes = import_file(
        Path::new(dump),
        Path::new(output),
        &ArtifactStore::new(),
        &LogSink,
    )?;

    if boxes.is_empty() {
        println!(
            "{} No content boxes found in {}",
            icon(WARNING),
            style(dump).yellow()
        );
    }
    println!(
        "{} Imported {} content box(es) to {}",
        icon(CHECKMARK),
        style(boxes.len()).bold(),
        style(output).cyan().bold()
    );
    Ok(())
}

/// Read, parse and persist; the testable core of [`cmd_import_dump`]
pub fn import_file<FS: FileSystem>(
    dump: &Path,
    output: &Path,
    store: &ArtifactStore<FS>,
    sink: &dyn ReportSink,
) -> Result<Vec<DumpedBox>> {
    let text = store
        .read_text(dump)
        .context("Failed to read layout dump")?;
    let boxes = parse_dump(&text);

    store
        .write_json(output, &boxes)
        .context("Failed to write imported boxes")?;
    sink.record(ReportEvent::ArtifactWritten {
        path: output.to_path_buf(),
    });

    Ok(boxes)
}
