//! Parser for a subject engine's textual layout dump
//!
//! The dump is a sequence of lines such as:
//!
//! ```text
//! Tag: div
//! Class: block-test
//! Content: x=37.00, y=120.50, width=887.00, height=40.00
//! ```
//!
//! Content boxes are reported, not border boxes; use
//! [`DumpedBox::border_box`] with known edges to recover the border box.

use crate::extractor::reconstruct_border_box;
use crate::geometry::{EdgeValues, Rect};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static TAG_RE: OnceLock<Regex> = OnceLock::new();
static CLASS_RE: OnceLock<Regex> = OnceLock::new();
static CONTENT_RE: OnceLock<Regex> = OnceLock::new();

const NUMBER: &str = r"(-?[\d.]+)";

/// One content box read from a layout dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpedBox {
    /// Tag name as printed by the engine
    pub tag: String,
    /// First class token, empty when none was printed
    pub class: String,
    /// Content box geometry
    pub content_box: Rect,
}

impl DumpedBox {
    /// Border box recovered from the content box and known edges
    pub fn border_box(&self, padding: EdgeValues, border: EdgeValues) -> Rect {
        reconstruct_border_box(self.content_box, padding, border)
    }
}

fn tag_re() -> &'static Regex {
    // SAFETY: constant pattern, always compiles
    TAG_RE.get_or_init(|| Regex::new(r"^Tag:\s*(\w+)").expect("tag regex is valid"))
}

fn class_re() -> &'static Regex {
    // SAFETY: constant pattern, always compiles
    CLASS_RE.get_or_init(|| Regex::new(r"^Class:\s*(\S+)").expect("class regex is valid"))
}

fn content_re() -> &'static Regex {
    CONTENT_RE.get_or_init(|| {
        // SAFETY: constant pattern, always compiles
        Regex::new(&format!(
            r"^Content:\s*x={NUMBER},\s*y={NUMBER},\s*width={NUMBER},\s*height={NUMBER}"
        ))
        .expect("content regex is valid")
    })
}

/// Parse every content box in `text`, in order
///
/// A `Tag:` line resets the current class. `Content:` lines before the first
/// `Tag:` and lines that do not parse are skipped.
///
/// # Examples
///
/// ```
/// use layout_parity::snapshot::parse_dump;
///
/// let boxes = parse_dump("Tag: h1\nContent: x=20.00, y=61.44, width=921.00, height=46.00\n");
/// assert_eq!(boxes.len(), 1);
/// assert_eq!(boxes[0].tag, "h1");
/// assert_eq!(boxes[0].content_box.width, 921.0);
/// ```
pub fn parse_dump(text: &str) -> Vec<DumpedBox> {
    let mut boxes = Vec::new();
    let mut tag: Option<String> = None;
    let mut class = String::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();

        if let Some(caps) = tag_re().captures(line) {
            tag = Some(caps[1].to_string());
            class.clear();
            continue;
        }
        if let Some(caps) = class_re().captures(line) {
            class = caps[1].to_string();
            continue;
        }

        let Some(current) = tag.as_ref() else {
            continue;
        };
        let Some(caps) = content_re().captures(line) else {
            continue;
        };

        let values: Vec<f64> = (1..=4).filter_map(|i| caps[i].parse().ok()).collect();
        match values[..] {
            [x, y, width, height] => boxes.push(DumpedBox {
                tag: current.clone(),
                class: class.clone(),
                content_box: Rect::new(x, y, width, height),
            }),
            _ => debug!("ignoring unparsable content line {}: {}", number + 1, line),
        }
    }

    boxes
}
