//! In-memory captured document
//!
//! A `CapturedDocument` is a frozen copy of a rendered document: element tree,
//! per-element bounding rectangle and resolved style, and the scroll offset at
//! capture time. Adapters over a rendering engine serialize to this shape; the
//! walker and extractor consume it through [`DocumentSource`].
//!
//! JSON shape:
//!
//! ```json
//! {
//!   "scroll": { "x": 0, "y": 0 },
//!   "root": {
//!     "tag": "HTML",
//!     "rect": { "left": 0, "top": 0, "width": 980, "height": 120 },
//!     "style": { "display": "block" },
//!     "children": [ { "tag": "BODY", "children": ["some text"] } ]
//!   }
//! }
//! ```

use crate::capture::{CaptureProvider, DocumentSource};
use crate::geometry::{RawRect, ScrollOffset};
use crate::style::StyleMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Handle to an element inside a [`CapturedDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the element in document order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Serialized form of a captured element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedElement {
    /// Tag name as reported by the host
    pub tag: String,
    /// `id` attribute
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// `class` attribute
    #[serde(
        default,
        deserialize_with = "deserialize_class_name",
        skip_serializing_if = "String::is_empty"
    )]
    pub class: String,
    /// Bounding rectangle (border box), viewport-relative; absent when the
    /// capture did not record one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<RawRect>,
    /// Resolved style in enumeration order
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub style: StyleMap,
    /// Child nodes in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CapturedNode>,
}

impl CapturedElement {
    /// Element with a tag and nothing else
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the `id` attribute
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the `class` attribute
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Set the bounding rectangle
    pub fn with_rect(mut self, rect: RawRect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Add one resolved style property
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property, value);
        self
    }

    /// Append an element child
    pub fn with_child(mut self, child: CapturedElement) -> Self {
        self.children.push(CapturedNode::Element(Box::new(child)));
        self
    }

    /// Append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(CapturedNode::Text(text.into()));
        self
    }
}

/// Deserialize a `className` as captured from a live DOM
///
/// SVG elements report an `SVGAnimatedString`, which arrives as an object;
/// its `baseVal` is the class attribute, and `{}` means none.
pub(crate) fn deserialize_class_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ClassName {
        Plain(String),
        Animated {
            #[serde(default, rename = "baseVal")]
            base_val: String,
        },
    }

    Ok(match ClassName::deserialize(deserializer)? {
        ClassName::Plain(value) => value,
        ClassName::Animated { base_val } => base_val,
    })
}

/// A child node: text or element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapturedNode {
    /// Text node
    Text(String),
    /// Element node
    Element(Box<CapturedElement>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DocumentCapture {
    #[serde(default)]
    scroll: ScrollOffset,
    #[serde(default)]
    root: Option<CapturedElement>,
}

#[derive(Debug, Clone)]
struct ElementNode {
    tag: String,
    id: String,
    class: String,
    rect: Option<RawRect>,
    style: StyleMap,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Frozen document implementing [`DocumentSource`]
///
/// Elements are stored in document order, so [`NodeId::index`] is the
/// element's position in a pre-order enumeration.
///
/// # Examples
///
/// ```
/// use layout_parity::capture::DocumentSource;
/// use layout_parity::document::{CapturedDocument, CapturedElement};
///
/// let doc = CapturedDocument::from_root(
///     CapturedElement::new("HTML")
///         .with_child(CapturedElement::new("BODY").with_text("hello")),
/// );
/// let tags: Vec<String> = doc.elements().into_iter().map(|e| doc.tag_name(e)).collect();
/// assert_eq!(tags, ["HTML", "BODY"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapturedDocument {
    nodes: Vec<ElementNode>,
    scroll: ScrollOffset,
}

impl CapturedDocument {
    /// Document with no elements
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a document from its root element, unscrolled
    pub fn from_root(root: CapturedElement) -> Self {
        Self::with_scroll(root, ScrollOffset::default())
    }

    /// Build a document from its root element and scroll position
    pub fn with_scroll(root: CapturedElement, scroll: ScrollOffset) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            scroll,
        };
        doc.insert(root, None);
        doc
    }

    /// Parse a document from its JSON capture
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let capture: DocumentCapture = serde_json::from_str(json)?;
        Ok(match capture.root {
            Some(root) => Self::with_scroll(root, capture.scroll),
            None => Self {
                nodes: Vec::new(),
                scroll: capture.scroll,
            },
        })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document has no elements
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element whose tag matches, case-insensitively
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.tag.eq_ignore_ascii_case(tag))
            .map(NodeId)
    }

    /// First element with the given `id`
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| !id.is_empty() && node.id == id)
            .map(NodeId)
    }

    /// Bounding rectangle exactly as captured, `None` when it was not recorded
    ///
    /// [`CaptureProvider::get_rect`] reads a missing rectangle as zero size.
    pub fn captured_rect(&self, element: NodeId) -> Option<RawRect> {
        self.node(element).rect
    }

    /// First element child of `<body>`
    pub fn first_body_child(&self) -> Option<NodeId> {
        let body = self.find_by_tag("body")?;
        self.nodes[body.0].children.first().copied()
    }

    // Returns the text content of the inserted subtree.
    fn insert(&mut self, element: CapturedElement, parent: Option<NodeId>) -> String {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementNode {
            tag: element.tag,
            id: element.id,
            class: element.class,
            rect: element.rect,
            style: element.style,
            text: String::new(),
            parent,
            children: Vec::new(),
        });

        let mut text = String::new();
        for child in element.children {
            match child {
                CapturedNode::Text(value) => text.push_str(&value),
                CapturedNode::Element(child) => {
                    let child_id = NodeId(self.nodes.len());
                    self.nodes[id.0].children.push(child_id);
                    let child_text = self.insert(*child, Some(id));
                    text.push_str(&child_text);
                }
            }
        }
        self.nodes[id.0].text = text.clone();
        text
    }

    fn node(&self, element: NodeId) -> &ElementNode {
        &self.nodes[element.0]
    }
}

impl CaptureProvider for CapturedDocument {
    type Handle = NodeId;

    fn get_rect(&self, element: NodeId) -> RawRect {
        self.node(element).rect.unwrap_or_default()
    }

    fn get_style(&self, element: NodeId, property: &str) -> Option<String> {
        self.node(element).style.get(property).map(str::to_string)
    }
}

impl DocumentSource for CapturedDocument {
    fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    fn elements(&self) -> Vec<NodeId> {
        (0..self.nodes.len()).map(NodeId).collect()
    }

    fn tag_name(&self, element: NodeId) -> String {
        self.node(element).tag.clone()
    }

    fn element_id(&self, element: NodeId) -> String {
        self.node(element).id.clone()
    }

    fn class_name(&self, element: NodeId) -> String {
        self.node(element).class.clone()
    }

    fn text_content(&self, element: NodeId) -> String {
        self.node(element).text.clone()
    }

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.node(element).parent
    }

    fn children(&self, element: NodeId) -> Vec<NodeId> {
        self.node(element).children.clone()
    }

    fn computed_style(&self, element: NodeId) -> Vec<(String, String)> {
        self.node(element).style.to_pairs()
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }
}
