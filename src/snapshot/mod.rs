//! Structured document snapshots
//!
//! Walks every element of a [`DocumentSource`] in document order and records
//! its identity plus either its full resolved style or its page rectangle.
//! Records serialize to the `element-rects.json` /
//! `computed-styles-structured.json` array format.

pub mod diff;
pub mod dump;
pub mod query;
pub mod text;

pub use diff::{diff_snapshots, ElementDiff, ElementKey, SnapshotDiff};
pub use dump::{parse_dump, DumpedBox};
pub use query::ElementQuery;

use crate::capture::DocumentSource;
use crate::document::deserialize_class_name;
use crate::error::ParityError;
use crate::geometry::{PageRect, RawRect, ScrollOffset};
use crate::report::{ReportEvent, ReportSink};
use crate::style::StyleMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Tags excluded from snapshots unless configured otherwise
pub const DEFAULT_SKIP_TAGS: [&str; 4] = ["SCRIPT", "STYLE", "LINK", "META"];

/// Conventional file name for rect snapshots
pub const RECTS_FILE_NAME: &str = "element-rects.json";

/// Conventional file name for style snapshots
pub const STYLES_FILE_NAME: &str = "computed-styles-structured.json";

/// What a walk records and which elements it leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct WalkOptions {
    /// Record the full resolved style and key styles
    pub include_styles: bool,
    /// Record the page rectangle, display, position and visibility
    pub include_rects: bool,
    /// Tag names excluded from output (case-insensitive); descendants are
    /// still visited
    pub skip_tags: Vec<String>,
    /// Maximum grapheme clusters of trimmed text content
    pub text_limit: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            include_styles: false,
            include_rects: true,
            skip_tags: DEFAULT_SKIP_TAGS.iter().map(|t| t.to_string()).collect(),
            text_limit: text::DEFAULT_TEXT_LIMIT,
        }
    }
}

impl WalkOptions {
    /// True when `tag` is excluded
    pub fn skips(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Frequently inspected style values, keyed the way capture scripts name them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyStyles {
    /// `width`
    pub width: String,
    /// `height`
    pub height: String,
    /// `background-color`
    pub background_color: String,
    /// `color`
    pub color: String,
    /// `font-size`
    pub font_size: String,
    /// `margin-top`
    pub margin_top: String,
    /// `margin-bottom`
    pub margin_bottom: String,
    /// `padding-top`
    pub padding_top: String,
    /// `padding-bottom`
    pub padding_bottom: String,
    /// `border-top-width`
    pub border_top_width: String,
}

impl KeyStyles {
    fn read<D: DocumentSource>(doc: &D, element: D::Handle) -> Self {
        let get = |property: &str| doc.get_style(element, property).unwrap_or_default();
        Self {
            width: get("width"),
            height: get("height"),
            background_color: get("background-color"),
            color: get("color"),
            font_size: get("font-size"),
            margin_top: get("margin-top"),
            margin_bottom: get("margin-bottom"),
            padding_top: get("padding-top"),
            padding_bottom: get("padding-bottom"),
            border_top_width: get("border-top-width"),
        }
    }
}

/// Identity of one element at capture time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Position in the full document enumeration, skipped elements included
    pub index: usize,
    /// Tag name as reported by the host
    pub tag_name: String,
    /// `class` attribute
    #[serde(default, deserialize_with = "deserialize_class_name")]
    pub class_name: String,
    /// `id` attribute
    #[serde(default)]
    pub id: String,
    /// Whitespace-trimmed text content, truncated
    #[serde(default)]
    pub text_content: String,
    /// Parent tag name, empty for the root
    #[serde(default)]
    pub parent_tag_name: String,
    /// Parent `class` attribute
    #[serde(default, deserialize_with = "deserialize_class_name")]
    pub parent_class_name: String,
    /// Parent `id` attribute
    #[serde(default)]
    pub parent_id: String,
    /// Number of element children
    #[serde(default)]
    pub child_element_count: usize,
    /// Resolved `display` (rect mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    /// Resolved `position` (rect mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Nonzero size and not hidden (rect mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Key style values (style mode)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_styles: Option<KeyStyles>,
}

impl ElementSnapshot {
    /// Whitespace-separated class tokens
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_name.split_whitespace()
    }

    /// Short `tag#id.class` label for display
    pub fn label(&self) -> String {
        let mut label = self.tag_name.to_ascii_lowercase();
        if !self.id.is_empty() {
            label.push('#');
            label.push_str(&self.id);
        }
        for class in self.classes() {
            label.push('.');
            label.push_str(class);
        }
        label
    }
}

/// One output record: identity plus styles and/or page rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Element identity
    pub element: ElementSnapshot,
    /// Full resolved style in enumeration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
    /// Page rectangle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<PageRect>,
}

/// Geometric and style visibility, independent of the viewport
///
/// An element below the fold with nonzero size is still visible.
pub fn is_visible(rect: &RawRect, visibility: &str, display: &str) -> bool {
    rect.width > 0.0 && rect.height > 0.0 && visibility != "hidden" && display != "none"
}

/// Walk the document in pre-order and record every element not skipped
///
/// The scroll offset is read once before traversal; page rectangles are only
/// consistent if the document does not scroll or resize while walking.
pub fn walk<D: DocumentSource>(
    doc: &D,
    options: &WalkOptions,
) -> Result<Vec<SnapshotRecord>, ParityError> {
    if doc.root().is_none() {
        return Err(ParityError::NoElementFound {
            target: "document element".to_string(),
        });
    }

    let scroll = doc.scroll_offset();
    let mut records = Vec::new();

    for (index, element) in doc.elements().into_iter().enumerate() {
        let tag = doc.tag_name(element);
        if options.skips(&tag) {
            debug!("skipping <{}> at index {}", tag, index);
            continue;
        }
        records.push(record(doc, element, index, tag, scroll, options));
    }

    Ok(records)
}

/// [`walk`], then report how many elements were captured and skipped
pub fn walk_reported<D: DocumentSource>(
    doc: &D,
    options: &WalkOptions,
    sink: &dyn ReportSink,
) -> Result<Vec<SnapshotRecord>, ParityError> {
    let records = walk(doc, options)?;
    sink.record(ReportEvent::SnapshotCaptured {
        elements: records.len(),
        skipped: doc.elements().len() - records.len(),
    });
    Ok(records)
}

fn record<D: DocumentSource>(
    doc: &D,
    element: D::Handle,
    index: usize,
    tag_name: String,
    scroll: ScrollOffset,
    options: &WalkOptions,
) -> SnapshotRecord {
    let parent = doc.parent(element);
    let mut snapshot = ElementSnapshot {
        index,
        tag_name,
        class_name: doc.class_name(element),
        id: doc.element_id(element),
        text_content: text::summarize(&doc.text_content(element), options.text_limit),
        parent_tag_name: parent.map(|p| doc.tag_name(p)).unwrap_or_default(),
        parent_class_name: parent.map(|p| doc.class_name(p)).unwrap_or_default(),
        parent_id: parent.map(|p| doc.element_id(p)).unwrap_or_default(),
        child_element_count: doc.child_element_count(element),
        ..ElementSnapshot::default()
    };

    let styles = options.include_styles.then(|| {
        snapshot.key_styles = Some(KeyStyles::read(doc, element));
        doc.computed_style(element).into_iter().collect::<StyleMap>()
    });

    let rect = options.include_rects.then(|| {
        let raw = doc.get_rect(element);
        let display = doc.get_style(element, "display").unwrap_or_default();
        let visibility = doc.get_style(element, "visibility").unwrap_or_default();
        snapshot.is_visible = Some(is_visible(&raw, &visibility, &display));
        snapshot.position = Some(doc.get_style(element, "position").unwrap_or_default());
        snapshot.display = Some(display);
        PageRect::from_viewport(raw, scroll)
    });

    SnapshotRecord {
        element: snapshot,
        styles,
        rect,
    }
}
