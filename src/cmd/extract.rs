//! Extract command implementation
//!
//! Handles the `layout-parity extract` command which derives one element's
//! box description from a captured document

use anyhow::{Context, Result};
use console::style;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::artifact::ArtifactStore;
use crate::document::{CapturedDocument, NodeId};
use crate::error::ParityError;
use crate::extractor::{extract_element, BoxDescription};
use crate::fmt::{format_px, icon, CHECKMARK, RULER, WARNING};
use crate::geometry::Rect;
use crate::infra::FileSystem;
use crate::report::{LogSink, ReportEvent, ReportSink};

/// Element selected for extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Target {
    /// First element child of `<body>`
    #[default]
    FirstBodyChild,
    /// First element with the given `id`
    Id(String),
}

impl Target {
    /// Locate the target in a captured document
    pub fn locate(&self, doc: &CapturedDocument) -> Result<NodeId, ParityError> {
        let found = match self {
            Self::FirstBodyChild => doc.first_body_child(),
            Self::Id(id) => doc.find_by_id(id),
        };
        found.ok_or_else(|| ParityError::NoElementFound {
            target: self.to_string(),
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstBodyChild => f.write_str("first element child of <body>"),
            Self::Id(id) => write!(f, "element with id \"{}\"", id),
        }
    }
}

impl FromStr for Target {
    type Err = ParityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if s == "first-body-child" => Ok(Self::FirstBodyChild),
            Some(("id", id)) if !id.is_empty() => Ok(Self::Id(id.to_string())),
            _ => Err(ParityError::Usage {
                what: format!(
                    "valid --target (got \"{}\"; expected first-body-child or id:<id>)",
                    s
                ),
            }),
        }
    }
}

/// Extract a box description from a captured document
///
/// # Examples
///
/// ```no_run
/// use layout_parity::cmd::extract::cmd_extract;
///
/// cmd_extract("reference_page.json", "reference_box.json", None)?;
/// cmd_extract("reference_page.json", "hero_box.json", Some("id:hero"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_extract(document: &str, output: &str, target: Option<&str>) -> Result<()> {
    let target = match target {
        Some(spec) => spec.parse::<Target>()?,
        None => Target::default(),
    };

    println!("{} {} Box Extraction", icon(RULER), style("layout-parity").bold());
    println!();

    let description = extract_file(
        Path::new(document),
        Path::new(output),
        &target,
        &ArtifactStore::new(),
        &LogSink,
    )?;

    present_description(&description, output);
    Ok(())
}

/// Load, locate, extract and persist; the testable core of [`cmd_extract`]
pub fn extract_file<FS: FileSystem>(
    document: &Path,
    output: &Path,
    target: &Target,
    store: &ArtifactStore<FS>,
    sink: &dyn ReportSink,
) -> Result<BoxDescription> {
    let doc = store
        .load_document(document)
        .context("Failed to load captured document")?;
    let element = target.locate(&doc)?;
    if doc.captured_rect(element).is_none() {
        return Err(ParityError::MalformedInput {
            path: document.to_path_buf(),
            source: serde::de::Error::missing_field("rect"),
        })
        .with_context(|| format!("Captured {} has no bounding rectangle", target));
    }
    let description = extract_element(&doc, element);

    store
        .write_json(output, &description)
        .context("Failed to write box description")?;
    sink.record(ReportEvent::ArtifactWritten {
        path: output.to_path_buf(),
    });

    Ok(description)
}

fn present_description(description: &BoxDescription, output: &str) {
    present_rect("Border box", &description.border_box);
    present_rect("Content box", &description.content_box);

    for warning in &description.warnings {
        println!("{} {}", icon(WARNING), style(warning).yellow());
    }

    println!();
    println!("{} Wrote {}", icon(CHECKMARK), style(output).cyan().bold());
}

fn present_rect(label: &str, rect: &Rect) {
    println!(
        "   {:<12} x {}  y {}  width {}  height {}",
        label,
        format_px(rect.x),
        format_px(rect.y),
        format_px(rect.width),
        format_px(rect.height)
    );
}
