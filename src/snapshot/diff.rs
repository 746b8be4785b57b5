//! Element-by-element comparison of two rect snapshots
//!
//! Records are paired by identity rather than by index, since the subject and
//! reference documents may enumerate a different number of elements.

use super::SnapshotRecord;
use crate::comparator::RectDiff;
use crate::geometry::PageRect;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identity used to pair elements across snapshots
///
/// `occurrence` counts earlier records with the same tag, id and class, so
/// repeated anonymous elements pair up in document order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementKey {
    /// Lowercased tag name
    pub tag: String,
    /// `id` attribute
    pub id: String,
    /// `class` attribute
    pub class: String,
    /// Zero-based occurrence of this tag/id/class combination
    pub occurrence: usize,
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        if !self.id.is_empty() {
            write!(f, "#{}", self.id)?;
        }
        for class in self.class.split_whitespace() {
            write!(f, ".{}", class)?;
        }
        write!(f, "[{}]", self.occurrence)
    }
}

/// Difference for one paired element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDiff {
    /// Pairing key
    pub key: ElementKey,
    /// Index of the element in the subject snapshot
    pub subject_index: usize,
    /// Index of the element in the reference snapshot
    pub reference_index: usize,
    /// Page-rect differences
    pub diff: RectDiff,
    /// All four differences within tolerance
    pub is_match: bool,
}

/// Outcome of comparing two rect snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    /// Tolerance applied
    pub tolerance: f64,
    /// Paired elements in subject order
    pub elements: Vec<ElementDiff>,
    /// Keys present only in the subject
    pub only_in_subject: Vec<ElementKey>,
    /// Keys present only in the reference
    pub only_in_reference: Vec<ElementKey>,
}

impl SnapshotDiff {
    /// Paired elements that matched
    pub fn matched_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_match).count()
    }

    /// Paired elements that did not match
    pub fn mismatches(&self) -> impl Iterator<Item = &ElementDiff> {
        self.elements.iter().filter(|e| !e.is_match)
    }

    /// Every element paired and matched
    pub fn is_match(&self) -> bool {
        self.only_in_subject.is_empty()
            && self.only_in_reference.is_empty()
            && self.elements.iter().all(|e| e.is_match)
    }
}

fn keyed(records: &[SnapshotRecord]) -> Vec<(ElementKey, usize, PageRect)> {
    let mut seen: HashMap<(String, String, String), usize> = HashMap::new();
    records
        .iter()
        .filter_map(|record| {
            let rect = record.rect?;
            let element = &record.element;
            let identity = (
                element.tag_name.to_ascii_lowercase(),
                element.id.clone(),
                element.class_name.clone(),
            );
            let counter = seen.entry(identity.clone()).or_insert(0);
            let occurrence = *counter;
            *counter += 1;
            let (tag, id, class) = identity;
            Some((
                ElementKey {
                    tag,
                    id,
                    class,
                    occurrence,
                },
                element.index,
                rect,
            ))
        })
        .collect()
}

/// Pair rect records by identity and compare their page rectangles
///
/// Uses the same inclusive tolerance rule as box comparison. Records without
/// a rectangle are ignored.
pub fn diff_snapshots(
    subject: &[SnapshotRecord],
    reference: &[SnapshotRecord],
    tolerance: f64,
) -> SnapshotDiff {
    let reference_keyed = keyed(reference);
    let lookup: HashMap<&ElementKey, (usize, &PageRect)> = reference_keyed
        .iter()
        .map(|(key, index, rect)| (key, (*index, rect)))
        .collect();

    let mut paired: HashSet<ElementKey> = HashSet::new();
    let mut elements = Vec::new();
    let mut only_in_subject = Vec::new();

    for (key, subject_index, subject_rect) in keyed(subject) {
        match lookup.get(&key) {
            Some((reference_index, reference_rect)) => {
                let diff = RectDiff::between(&subject_rect.as_rect(), &reference_rect.as_rect());
                paired.insert(key.clone());
                elements.push(ElementDiff {
                    key,
                    subject_index,
                    reference_index: *reference_index,
                    is_match: diff.within(tolerance),
                    diff,
                });
            }
            None => only_in_subject.push(key),
        }
    }

    let only_in_reference = reference_keyed
        .iter()
        .filter(|(key, _, _)| !paired.contains(key))
        .map(|(key, _, _)| key.clone())
        .collect();

    SnapshotDiff {
        tolerance,
        elements,
        only_in_subject,
        only_in_reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{RawRect, ScrollOffset};
    use crate::snapshot::ElementSnapshot;

    fn rect_record(index: usize, tag: &str, class: &str, rect: RawRect) -> SnapshotRecord {
        SnapshotRecord {
            element: ElementSnapshot {
                index,
                tag_name: tag.to_string(),
                class_name: class.to_string(),
                ..ElementSnapshot::default()
            },
            styles: None,
            rect: Some(PageRect::from_viewport(rect, ScrollOffset::default())),
        }
    }

    #[test]
    fn test_pairs_by_identity_and_occurrence() {
        let subject = vec![
            rect_record(0, "html", "", RawRect::new(0.0, 0.0, 980.0, 600.0)),
            rect_record(1, "p", "", RawRect::new(8.0, 10.0, 100.0, 20.0)),
            rect_record(2, "p", "", RawRect::new(8.0, 40.0, 100.0, 20.0)),
        ];
        let reference = vec![
            rect_record(0, "HTML", "", RawRect::new(0.0, 0.0, 980.0, 600.0)),
            rect_record(3, "P", "", RawRect::new(8.0, 10.5, 100.0, 20.0)),
            rect_record(4, "P", "", RawRect::new(8.0, 43.0, 100.0, 20.0)),
        ];

        let result = diff_snapshots(&subject, &reference, 1.0);

        assert_eq!(result.elements.len(), 3);
        assert_eq!(result.matched_count(), 2);
        let mismatch: Vec<_> = result.mismatches().collect();
        assert_eq!(mismatch.len(), 1);
        assert_eq!(mismatch[0].key.occurrence, 1);
        assert_eq!(mismatch[0].reference_index, 4);
        assert_eq!(mismatch[0].diff.y, 3.0);
        assert!(!result.is_match());
    }

    #[test]
    fn test_unpaired_keys_are_listed() {
        let subject = vec![
            rect_record(0, "div", "a", RawRect::new(0.0, 0.0, 10.0, 10.0)),
            rect_record(1, "div", "b", RawRect::new(0.0, 0.0, 10.0, 10.0)),
        ];
        let reference = vec![
            rect_record(0, "div", "a", RawRect::new(0.0, 0.0, 10.0, 10.0)),
            rect_record(1, "div", "c", RawRect::new(0.0, 0.0, 10.0, 10.0)),
        ];

        let result = diff_snapshots(&subject, &reference, 0.0);

        assert_eq!(result.matched_count(), 1);
        assert_eq!(result.only_in_subject[0].class, "b");
        assert_eq!(result.only_in_reference[0].class, "c");
        assert!(!result.is_match());
    }

    #[test]
    fn test_records_without_rect_are_ignored() {
        let mut styled = rect_record(0, "div", "", RawRect::new(0.0, 0.0, 1.0, 1.0));
        styled.rect = None;

        let result = diff_snapshots(&[styled], &[], 1.0);

        assert!(result.elements.is_empty());
        assert!(result.only_in_subject.is_empty());
        assert!(result.is_match());
    }

    #[test]
    fn test_key_display() {
        let key = ElementKey {
            tag: "div".to_string(),
            id: "main".to_string(),
            class: "x y".to_string(),
            occurrence: 2,
        };
        assert_eq!(key.to_string(), "div#main.x.y[2]");
    }
}
