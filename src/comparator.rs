//! Tolerance comparison of two box descriptions
//!
//! Per-field absolute differences are computed for both rectangles; a
//! rectangle matches when every one of its four differences is within
//! tolerance (inclusive). There is no partial credit.

use crate::error::ParityError;
use crate::extractor::BoxDescription;
use crate::geometry::Rect;
use crate::report::{Operand, ReportEvent, ReportSink};
use serde::{Deserialize, Serialize};

/// Default tolerance: one device pixel of rounding divergence
pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Validated comparison threshold (finite, non-negative)
///
/// # Examples
///
/// ```
/// use layout_parity::comparator::Tolerance;
///
/// assert_eq!(Tolerance::default().value(), 1.0);
/// assert!(Tolerance::new(0.0).is_ok());
/// assert!(Tolerance::new(-0.5).is_err());
/// assert!(Tolerance::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Validate a raw threshold
    pub fn new(value: f64) -> Result<Self, ParityError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(ParityError::InvalidTolerance { value })
        }
    }

    /// The threshold in pixels
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

/// Absolute per-field differences between two rectangles
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectDiff {
    /// `|a.x - b.x|`
    pub x: f64,
    /// `|a.y - b.y|`
    pub y: f64,
    /// `|a.width - b.width|`
    pub width: f64,
    /// `|a.height - b.height|`
    pub height: f64,
}

impl RectDiff {
    /// Field-wise absolute difference; symmetric in its arguments
    pub fn between(a: &Rect, b: &Rect) -> Self {
        Self {
            x: (a.x - b.x).abs(),
            y: (a.y - b.y).abs(),
            width: (a.width - b.width).abs(),
            height: (a.height - b.height).abs(),
        }
    }

    /// True when all four differences are `<= tolerance`
    pub fn within(&self, tolerance: f64) -> bool {
        self.x <= tolerance
            && self.y <= tolerance
            && self.width <= tolerance
            && self.height <= tolerance
    }

    /// Largest of the four differences
    pub fn max(&self) -> f64 {
        self.x.max(self.y).max(self.width).max(self.height)
    }
}

/// Outcome of comparing a subject box against a reference box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// All content-box differences within tolerance
    pub content_box_match: bool,
    /// All border-box differences within tolerance
    pub border_box_match: bool,
    /// Content-box differences
    pub content_box_diff: RectDiff,
    /// Border-box differences
    pub border_box_diff: RectDiff,
}

impl ComparisonResult {
    /// True when both rectangles match
    pub fn is_match(&self) -> bool {
        self.content_box_match && self.border_box_match
    }

    /// Largest difference across both rectangles
    pub fn max_diff(&self) -> f64 {
        self.content_box_diff.max().max(self.border_box_diff.max())
    }
}

/// Compare a subject description with a reference description
///
/// `tolerance` is a caller-supplied non-negative threshold; a difference equal
/// to it still matches. Pure and deterministic.
///
/// # Examples
///
/// ```
/// use layout_parity::comparator::compare;
/// use layout_parity::extractor::extract;
/// use layout_parity::geometry::{EdgeValues, RawRect};
///
/// let subject = extract(RawRect::new(0.0, 0.0, 100.0, 50.0), EdgeValues::default(), EdgeValues::default(), EdgeValues::default());
/// let reference = extract(RawRect::new(0.5, 0.0, 100.5, 50.0), EdgeValues::default(), EdgeValues::default(), EdgeValues::default());
///
/// let result = compare(&subject, &reference, 1.0);
/// assert!(result.border_box_match);
/// assert_eq!(result.border_box_diff.x, 0.5);
/// ```
pub fn compare(
    subject: &BoxDescription,
    reference: &BoxDescription,
    tolerance: f64,
) -> ComparisonResult {
    let content_box_diff = RectDiff::between(&subject.content_box, &reference.content_box);
    let border_box_diff = RectDiff::between(&subject.border_box, &reference.border_box);

    ComparisonResult {
        content_box_match: content_box_diff.within(tolerance),
        border_box_match: border_box_diff.within(tolerance),
        content_box_diff,
        border_box_diff,
    }
}

/// Compare two descriptions and report anomalies and the outcome to `sink`
///
/// Anomalies of either input are re-derived from geometry and emitted before
/// the comparison event; they never change the result.
pub fn verify(
    subject: &BoxDescription,
    reference: &BoxDescription,
    tolerance: Tolerance,
    sink: &dyn ReportSink,
) -> ComparisonResult {
    for (side, description) in [(Operand::Subject, subject), (Operand::Reference, reference)] {
        for anomaly in description.anomalies() {
            sink.record(ReportEvent::AnomalyDetected { side, anomaly });
        }
    }

    let result = compare(subject, reference, tolerance.value());
    sink.record(ReportEvent::ComparisonCompleted {
        content_box_match: result.content_box_match,
        border_box_match: result.border_box_match,
        max_diff: result.max_diff(),
        tolerance: tolerance.value(),
    });
    result
}
