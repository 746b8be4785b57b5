//! Snapshot command implementation
//!
//! Handles the `layout-parity snapshot` command which walks a captured
//! document and writes a structured rect and/or style snapshot

use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

use crate::artifact::ArtifactStore;
use crate::cmd::load_config;
use crate::config::{ConfigOverrides, ParityConfig};
use crate::fmt::{icon, CHECKMARK, MICROSCOPE};
use crate::infra::FileSystem;
use crate::report::{LogSink, ReportEvent, ReportSink};
use crate::snapshot::{walk_reported, SnapshotRecord, RECTS_FILE_NAME, STYLES_FILE_NAME};

/// Options for the snapshot command
#[derive(Debug, Clone, Default)]
pub struct SnapshotArgs {
    /// Record full resolved styles
    pub styles: bool,
    /// Record page rectangles (implied when `styles` is false)
    pub rects: bool,
    /// Override configured skip tags
    pub skip_tags: Vec<String>,
    /// Override configured text limit
    pub text_limit: Option<usize>,
    /// Output path; defaults to the conventional file name
    pub output: Option<String>,
}

impl SnapshotArgs {
    /// Whether rects are recorded after applying the implicit default
    pub fn include_rects(&self) -> bool {
        self.rects || !self.styles
    }

    /// Output path after applying the naming convention
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => PathBuf::from(path),
            None if self.styles && !self.rects => PathBuf::from(STYLES_FILE_NAME),
            None => PathBuf::from(RECTS_FILE_NAME),
        }
    }
}

/// Walk a captured document and write its snapshot
///
/// # Examples
///
/// ```no_run
/// use layout_parity::cmd::snapshot::{cmd_snapshot, SnapshotArgs};
///
/// // element-rects.json
/// cmd_snapshot("page.json", &SnapshotArgs::default())?;
///
/// // computed-styles-structured.json
/// cmd_snapshot("page.json", &SnapshotArgs { styles: true, ..SnapshotArgs::default() })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_snapshot(document: &str, args: &SnapshotArgs) -> Result<()> {
    let config = load_config(ConfigOverrides {
        tolerance: None,
        text_limit: args.text_limit,
        skip_tags: args.skip_tags.clone(),
    })?;
    let output = args.output_path();

    println!("{} {} Document Snapshot", icon(MICROSCOPE), style("layout-parity").bold());
    println!();

    let records = snapshot_file(
        Path::new(document),
        &output,
        args,
        &config,
        &ArtifactStore::new(),
        &LogSink,
    )?;

    println!(
        "{} Exported {} elements to {}",
        icon(CHECKMARK),
        style(records.len()).bold(),
        style(output.display()).cyan().bold()
    );
    Ok(())
}

/// Load, walk and persist; the testable core of [`cmd_snapshot`]
pub fn snapshot_file<FS: FileSystem>(
    document: &Path,
    output: &Path,
    args: &SnapshotArgs,
    config: &ParityConfig,
    store: &ArtifactStore<FS>,
    sink: &dyn ReportSink,
) -> Result<Vec<SnapshotRecord>> {
    config.validate()?;

    let doc = store
        .load_document(document)
        .context("Failed to load captured document")?;
    let options = config.walk_options(args.styles, args.include_rects());
    let records = walk_reported(&doc, &options, sink)?;

    store
        .write_json(output, &records)
        .context("Failed to write snapshot")?;
    sink.record(ReportEvent::ArtifactWritten {
        path: output.to_path_buf(),
    });

    Ok(records)
}
