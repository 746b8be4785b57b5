//! Element lookup over snapshot records

use super::{ElementSnapshot, SnapshotRecord};

/// Conjunctive filter over element identity
///
/// Unset criteria match everything.
///
/// # Examples
///
/// ```
/// use layout_parity::snapshot::{ElementQuery, ElementSnapshot};
///
/// let element = ElementSnapshot {
///     tag_name: "DIV".to_string(),
///     class_name: "block-test wide".to_string(),
///     ..ElementSnapshot::default()
/// };
/// assert!(ElementQuery::new().tag("div").class("wide").matches(&element));
/// assert!(!ElementQuery::new().class("block").matches(&element));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementQuery {
    /// Tag name, case-insensitive
    pub tag: Option<String>,
    /// One of the element's class tokens
    pub class: Option<String>,
    /// Exact `id`
    pub id: Option<String>,
    /// Substring of the trimmed text content
    pub text: Option<String>,
    /// Substring of the parent's `class` attribute
    pub parent_class: Option<String>,
}

impl ElementQuery {
    /// Query matching every element
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a tag name
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Require a class token
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Require an `id`
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Require a text substring
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Require a parent class substring
    pub fn parent_class(mut self, parent_class: impl Into<String>) -> Self {
        self.parent_class = Some(parent_class.into());
        self
    }

    /// True when every set criterion holds
    pub fn matches(&self, element: &ElementSnapshot) -> bool {
        self.tag
            .as_deref()
            .is_none_or(|tag| element.tag_name.eq_ignore_ascii_case(tag))
            && self
                .class
                .as_deref()
                .is_none_or(|class| element.classes().any(|c| c == class))
            && self.id.as_deref().is_none_or(|id| element.id == id)
            && self
                .text
                .as_deref()
                .is_none_or(|text| element.text_content.contains(text))
            && self
                .parent_class
                .as_deref()
                .is_none_or(|parent| element.parent_class_name.contains(parent))
    }

    /// Matching records in snapshot order
    pub fn select<'q, 'r: 'q>(
        &'q self,
        records: &'r [SnapshotRecord],
    ) -> impl Iterator<Item = &'r SnapshotRecord> + 'q {
        records.iter().filter(move |record| self.matches(&record.element))
    }
}
