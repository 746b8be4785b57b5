//! Capture Provider abstraction over a live rendering context
//!
//! The core never touches a live document. Adapters over a rendering or
//! automation API implement these traits and hand back captured value types;
//! [`crate::document::CapturedDocument`] is the in-memory implementation used
//! for persisted captures and tests.

use crate::geometry::{EdgeKind, EdgeValues, RawRect, ScrollOffset};

/// Minimal geometry/style access needed to extract one element's box
pub trait CaptureProvider {
    /// Opaque element handle
    type Handle: Copy;

    /// Bounding rectangle of the element's rendered content (its border box)
    fn get_rect(&self, element: Self::Handle) -> RawRect;

    /// Resolved style value for a hyphenated property name
    ///
    /// Returns `None` when the property is not present in the element's
    /// resolved style.
    fn get_style(&self, element: Self::Handle, property: &str) -> Option<String>;
}

/// Tree navigation and identity access needed to walk a whole document
pub trait DocumentSource: CaptureProvider {
    /// Document element (`<html>`), if any
    fn root(&self) -> Option<Self::Handle>;

    /// Every element in document order (pre-order), starting at the root
    fn elements(&self) -> Vec<Self::Handle>;

    /// Tag name as reported by the host (usually uppercase)
    fn tag_name(&self, element: Self::Handle) -> String;

    /// `id` attribute, empty when absent
    fn element_id(&self, element: Self::Handle) -> String;

    /// `class` attribute, empty when absent
    fn class_name(&self, element: Self::Handle) -> String;

    /// Concatenated text of all descendant text nodes
    fn text_content(&self, element: Self::Handle) -> String;

    /// Parent element, `None` for the root
    fn parent(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Element children, in order
    fn children(&self, element: Self::Handle) -> Vec<Self::Handle>;

    /// Number of element children
    fn child_element_count(&self, element: Self::Handle) -> usize {
        self.children(element).len()
    }

    /// Full resolved style in the style system's own enumeration order
    fn computed_style(&self, element: Self::Handle) -> Vec<(String, String)>;

    /// Current document scroll position
    fn scroll_offset(&self) -> ScrollOffset;
}

/// Everything needed to derive one element's box, read in a single step
///
/// Geometry and style are captured together so the resulting description is
/// self-consistent as long as the provider is not mutated mid-capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementCapture {
    /// Border-box geometry
    pub rect: RawRect,
    /// Resolved padding
    pub padding: EdgeValues,
    /// Resolved border widths
    pub border: EdgeValues,
    /// Resolved margins
    pub margin: EdgeValues,
}

impl ElementCapture {
    /// Read geometry and the twelve edge properties of `element`
    pub fn read<P: CaptureProvider>(provider: &P, element: P::Handle) -> Self {
        let rect = provider.get_rect(element);
        let edges =
            |kind: EdgeKind| EdgeValues::resolve(kind, |prop| provider.get_style(element, prop));
        Self {
            rect,
            padding: edges(EdgeKind::Padding),
            border: edges(EdgeKind::Border),
            margin: edges(EdgeKind::Margin),
        }
    }
}
