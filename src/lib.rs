#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! layout-parity library
//!
//! This library provides CSS box-model extraction, tolerance comparison and
//! structured document snapshots for verifying a layout engine against a
//! reference browser. It can be used programmatically in addition to the
//! CLI interface.
//!
//! # Basic Example
//!
//! Extracting a box and comparing it against a reference:
//!
//! ```
//! use layout_parity::comparator::compare;
//! use layout_parity::extractor::extract;
//! use layout_parity::geometry::{EdgeValues, RawRect};
//!
//! let padding = EdgeValues::uniform(15.0);
//! let border = EdgeValues::uniform(2.0);
//!
//! let reference = extract(RawRect::new(20.0, 103.5, 921.0, 74.0), padding, border, EdgeValues::default());
//! let subject = extract(RawRect::new(20.5, 103.5, 921.0, 74.0), padding, border, EdgeValues::default());
//!
//! let result = compare(&subject, &reference, 1.0);
//! assert!(result.is_match());
//! assert_eq!(result.content_box_diff.x, 0.5);
//! ```
//!
//! # Advanced Example: Document Snapshot
//!
//! Walking a captured document in document order:
//!
//! ```
//! use layout_parity::document::{CapturedDocument, CapturedElement};
//! use layout_parity::geometry::RawRect;
//! use layout_parity::snapshot::{walk, ElementQuery, WalkOptions};
//!
//! let doc = CapturedDocument::from_root(
//!     CapturedElement::new("HTML").with_child(
//!         CapturedElement::new("BODY")
//!             .with_child(CapturedElement::new("SCRIPT"))
//!             .with_child(
//!                 CapturedElement::new("DIV")
//!                     .with_class("block-test")
//!                     .with_rect(RawRect::new(20.0, 120.0, 921.0, 74.0))
//!                     .with_text("  Block  "),
//!             ),
//!     ),
//! );
//!
//! let records = walk(&doc, &WalkOptions::default())?;
//! let indices: Vec<usize> = records.iter().map(|r| r.element.index).collect();
//! assert_eq!(indices, [0, 1, 3]);
//!
//! let block: Vec<_> = ElementQuery::new().class("block-test").select(&records).collect();
//! assert_eq!(block[0].element.text_content, "Block");
//! # Ok::<(), layout_parity::error::ParityError>(())
//! ```

/// Reading and writing JSON artifacts
pub mod artifact;
/// Host capture capabilities
pub mod capture;
/// Command handlers for CLI operations
pub mod cmd;
/// Tolerance comparison of box descriptions
pub mod comparator;
/// Configuration file loading and overrides
pub mod config;
/// Frozen captured documents
pub mod document;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Box-model extraction
pub mod extractor;
/// Shared formatting utilities
pub mod fmt;
/// Rectangles, edge values and CSS length parsing
pub mod geometry;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Structured reporting of comparison and snapshot events
pub mod report;
/// Document walking, querying, diffing and dump import
pub mod snapshot;
/// Order-preserving resolved style maps
pub mod style;
