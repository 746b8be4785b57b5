//! Box-model extraction
//!
//! Derives an element's border box and content box from primitive geometry
//! and resolved edge values. The bounding-rectangle primitive already reports
//! the border box, so the border box is copied verbatim and the content box is
//! obtained by subtracting border and padding insets.

use crate::capture::{CaptureProvider, ElementCapture};
use crate::geometry::{EdgeKind, EdgeValues, RawRect, Rect, Side};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory annotation for geometry that indicates malformed upstream input
///
/// Anomalies never abort extraction and nothing is clamped: the content box is
/// reported exactly as computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometricAnomaly {
    /// A padding or border edge is negative
    NegativeEdge {
        /// Padding or border
        edge: EdgeKind,
        /// Side holding the negative value
        side: Side,
        /// The negative value
        value: f64,
    },
    /// Border and padding insets exceed the border-box width
    NegativeContentWidth {
        /// Computed content width
        width: f64,
    },
    /// Border and padding insets exceed the border-box height
    NegativeContentHeight {
        /// Computed content height
        height: f64,
    },
}

impl fmt::Display for GeometricAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeEdge { edge, side, value } => {
                write!(f, "negative {} on {} side ({})", edge.as_str(), side.as_str(), value)
            }
            Self::NegativeContentWidth { width } => {
                write!(f, "content box width is negative ({})", width)
            }
            Self::NegativeContentHeight { height } => {
                write!(f, "content box height is negative ({})", height)
            }
        }
    }
}

/// Border box, content box and edge values of one rendered element
///
/// This is also the persisted `*_box.json` artifact shape. Deserialization is
/// strict: every rectangle and edge field must be present and numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDescription {
    /// Content area, inside padding and border
    pub content_box: Rect,
    /// Rectangle including border, excluding margin
    pub border_box: Rect,
    /// Resolved padding
    pub padding: EdgeValues,
    /// Resolved border widths
    pub border: EdgeValues,
    /// Resolved margins
    pub margin: EdgeValues,
    /// Geometric anomalies detected at extraction time
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<GeometricAnomaly>,
}

impl BoxDescription {
    /// Re-derive anomalies from the stored geometry
    ///
    /// Useful for descriptions loaded from artifacts produced elsewhere, whose
    /// `warnings` field cannot be trusted to be present.
    pub fn anomalies(&self) -> Vec<GeometricAnomaly> {
        detect_anomalies(&self.content_box, &self.padding, &self.border)
    }

    /// True when any anomaly is present
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies().is_empty()
    }
}

/// Derive a [`BoxDescription`] from a bounding rectangle and edge values
///
/// Negative margins are legitimate CSS and pass through silently; negative
/// padding/border or a negative content size is annotated in `warnings`.
///
/// # Examples
///
/// ```
/// use layout_parity::extractor::extract;
/// use layout_parity::geometry::{EdgeValues, RawRect, Rect};
///
/// let boxes = extract(
///     RawRect::new(10.0, 20.0, 100.0, 50.0),
///     EdgeValues::uniform(5.0),
///     EdgeValues::uniform(2.0),
///     EdgeValues::default(),
/// );
/// assert_eq!(boxes.border_box, Rect::new(10.0, 20.0, 100.0, 50.0));
/// assert_eq!(boxes.content_box, Rect::new(17.0, 27.0, 86.0, 36.0));
/// assert!(boxes.warnings.is_empty());
/// ```
pub fn extract(
    raw: RawRect,
    padding: EdgeValues,
    border: EdgeValues,
    margin: EdgeValues,
) -> BoxDescription {
    let border_box = Rect::from(raw);
    let content_box = Rect {
        x: border_box.x + border.left + padding.left,
        y: border_box.y + border.top + padding.top,
        width: border_box.width - border.left - border.right - padding.left - padding.right,
        height: border_box.height - border.top - border.bottom - padding.top - padding.bottom,
    };

    let warnings = detect_anomalies(&content_box, &padding, &border);
    for anomaly in &warnings {
        warn!("geometric anomaly: {}", anomaly);
    }

    BoxDescription {
        content_box,
        border_box,
        padding,
        border,
        margin,
        warnings,
    }
}

/// Extract a box from an already captured element
pub fn extract_capture(capture: &ElementCapture) -> BoxDescription {
    extract(capture.rect, capture.padding, capture.border, capture.margin)
}

/// Read one element through a provider and extract its box
///
/// Geometry and all edge values are read in one uninterrupted step before any
/// arithmetic happens.
pub fn extract_element<P: CaptureProvider>(provider: &P, element: P::Handle) -> BoxDescription {
    let capture = ElementCapture::read(provider, element);
    debug!(
        "captured rect {:?} padding {:?} border {:?}",
        capture.rect, capture.padding, capture.border
    );
    extract_capture(&capture)
}

fn detect_anomalies(
    content_box: &Rect,
    padding: &EdgeValues,
    border: &EdgeValues,
) -> Vec<GeometricAnomaly> {
    let mut anomalies = Vec::new();

    for (edge, values) in [(EdgeKind::Padding, padding), (EdgeKind::Border, border)] {
        for (side, value) in values.negative_sides() {
            anomalies.push(GeometricAnomaly::NegativeEdge { edge, side, value });
        }
    }

    if content_box.width < 0.0 {
        anomalies.push(GeometricAnomaly::NegativeContentWidth {
            width: content_box.width,
        });
    }
    if content_box.height < 0.0 {
        anomalies.push(GeometricAnomaly::NegativeContentHeight {
            height: content_box.height,
        });
    }

    anomalies
}

/// Recover a border box from a content box and known edges
///
/// Inverse of the content-box derivation in [`extract`], for subject engines
/// that only report content boxes.
///
/// # Examples
///
/// ```
/// use layout_parity::extractor::reconstruct_border_box;
/// use layout_parity::geometry::{EdgeValues, Rect};
///
/// let border_box = reconstruct_border_box(
///     Rect::new(20.0, 61.44, 921.0, 46.0),
///     EdgeValues::default(),
///     EdgeValues::uniform(2.0),
/// );
/// assert_eq!(border_box.x, 18.0);
/// assert_eq!(border_box.width, 925.0);
/// ```
pub fn reconstruct_border_box(content: Rect, padding: EdgeValues, border: EdgeValues) -> Rect {
    Rect {
        x: content.x - padding.left - border.left,
        y: content.y - padding.top - border.top,
        width: content.width + padding.horizontal() + border.horizontal(),
        height: content.height + padding.vertical() + border.vertical(),
    }
}

/// Default epsilon for [`verify_border_box`]
pub const BORDER_BOX_EPSILON: f64 = 0.1;

/// Outcome of checking whether a bounding rectangle is the border box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderBoxCheck {
    /// `content width + horizontal padding + horizontal border`
    pub expected_width: f64,
    /// Width reported by the bounding-rectangle primitive
    pub actual_width: f64,
    /// Absolute difference between the two
    pub difference: f64,
    /// True when the difference is below epsilon
    pub is_border_box: bool,
}

/// Check that a bounding rectangle reports the border box
///
/// Compares the rectangle width with the resolved content `width` grown by
/// horizontal padding and border.
pub fn verify_border_box(
    raw: RawRect,
    content_width: f64,
    padding: EdgeValues,
    border: EdgeValues,
    epsilon: f64,
) -> BorderBoxCheck {
    let expected_width = content_width + padding.horizontal() + border.horizontal();
    let difference = (raw.width - expected_width).abs();
    BorderBoxCheck {
        expected_width,
        actual_width: raw.width,
        difference,
        is_border_box: difference < epsilon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_scenario_uniform_padding_and_border() {
        let boxes = extract(
            RawRect::new(10.0, 20.0, 100.0, 50.0),
            EdgeValues::new(5.0, 5.0, 5.0, 5.0),
            EdgeValues::new(2.0, 2.0, 2.0, 2.0),
            EdgeValues::uniform(8.0),
        );

        assert_eq!(boxes.content_box, Rect::new(17.0, 27.0, 86.0, 36.0));
        assert_eq!(boxes.margin, EdgeValues::uniform(8.0));
        assert!(boxes.warnings.is_empty());
    }

    #[test]
    fn test_extract_asymmetric_edges() {
        let boxes = extract(
            RawRect::new(0.0, 0.0, 200.0, 100.0),
            EdgeValues::new(1.0, 2.0, 3.0, 4.0),
            EdgeValues::new(10.0, 20.0, 30.0, 40.0),
            EdgeValues::default(),
        );

        assert_eq!(boxes.content_box, Rect::new(44.0, 11.0, 134.0, 56.0));
    }

    #[test]
    fn test_extract_negative_edges_flags_anomaly_without_clamping() {
        let boxes = extract(
            RawRect::new(0.0, 0.0, 10.0, 10.0),
            EdgeValues::new(0.0, -3.0, 0.0, 0.0),
            EdgeValues::new(-1.0, 0.0, 0.0, 0.0),
            EdgeValues::default(),
        );

        assert_eq!(boxes.content_box.width, 13.0);
        assert_eq!(boxes.content_box.y, -1.0);
        assert!(boxes.warnings.contains(&GeometricAnomaly::NegativeEdge {
            edge: EdgeKind::Padding,
            side: Side::Right,
            value: -3.0,
        }));
        assert!(boxes.warnings.contains(&GeometricAnomaly::NegativeEdge {
            edge: EdgeKind::Border,
            side: Side::Top,
            value: -1.0,
        }));
    }

    #[test]
    fn test_extract_oversized_insets_report_negative_content() {
        let boxes = extract(
            RawRect::new(0.0, 0.0, 10.0, 4.0),
            EdgeValues::uniform(4.0),
            EdgeValues::uniform(2.0),
            EdgeValues::default(),
        );

        assert_eq!(boxes.content_box.width, -2.0);
        assert_eq!(boxes.content_box.height, -8.0);
        assert_eq!(
            boxes.warnings,
            vec![
                GeometricAnomaly::NegativeContentWidth { width: -2.0 },
                GeometricAnomaly::NegativeContentHeight { height: -8.0 },
            ]
        );
    }

    #[test]
    fn test_negative_margin_is_not_an_anomaly() {
        let boxes = extract(
            RawRect::new(0.0, 0.0, 50.0, 50.0),
            EdgeValues::default(),
            EdgeValues::default(),
            EdgeValues::new(-10.0, 0.0, -10.0, 0.0),
        );
        assert!(boxes.warnings.is_empty());
        assert!(!boxes.has_anomalies());
    }

    #[test]
    fn test_anomalies_rederived_for_loaded_description() {
        let json = r#"{
            "content_box": {"x": 0, "y": 0, "width": -4, "height": 10},
            "border_box": {"x": 0, "y": 0, "width": 10, "height": 10},
            "padding": {"top": 0, "right": 7, "bottom": 0, "left": 7},
            "border": {"top": 0, "right": 0, "bottom": 0, "left": 0},
            "margin": {"top": 0, "right": 0, "bottom": 0, "left": 0}
        }"#;
        let boxes: BoxDescription = serde_json::from_str(json).unwrap();

        assert!(boxes.warnings.is_empty());
        assert_eq!(
            boxes.anomalies(),
            vec![GeometricAnomaly::NegativeContentWidth { width: -4.0 }]
        );
    }

    #[test]
    fn test_description_rejects_missing_field() {
        let json = r#"{
            "content_box": {"x": 0, "y": 0, "width": 4},
            "border_box": {"x": 0, "y": 0, "width": 10, "height": 10},
            "padding": {"top": 0, "right": 0, "bottom": 0, "left": 0},
            "border": {"top": 0, "right": 0, "bottom": 0, "left": 0},
            "margin": {"top": 0, "right": 0, "bottom": 0, "left": 0}
        }"#;
        let err = serde_json::from_str::<BoxDescription>(json).unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_description_serializes_snake_case_without_empty_warnings() {
        let boxes = extract(
            RawRect::new(1.0, 2.0, 3.0, 4.0),
            EdgeValues::default(),
            EdgeValues::default(),
            EdgeValues::default(),
        );
        let json = serde_json::to_value(&boxes).unwrap();
        assert!(json.get("content_box").is_some());
        assert!(json.get("border_box").is_some());
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn test_reconstruct_inverts_extract() {
        let padding = EdgeValues::uniform(15.0);
        let border = EdgeValues::uniform(2.0);
        let raw = RawRect::new(3.0, 5.0, 300.0, 120.0);

        let boxes = extract(raw, padding, border, EdgeValues::default());
        let rebuilt = reconstruct_border_box(boxes.content_box, padding, border);

        assert_eq!(rebuilt, boxes.border_box);
    }

    #[test]
    fn test_verify_border_box_detects_border_box_geometry() {
        let check = verify_border_box(
            RawRect::new(0.0, 0.0, 925.0, 50.0),
            921.0,
            EdgeValues::default(),
            EdgeValues::uniform(2.0),
            BORDER_BOX_EPSILON,
        );
        assert!(check.is_border_box);
        assert_eq!(check.expected_width, 925.0);

        let content_sized = verify_border_box(
            RawRect::new(0.0, 0.0, 921.0, 50.0),
            921.0,
            EdgeValues::default(),
            EdgeValues::uniform(2.0),
            BORDER_BOX_EPSILON,
        );
        assert!(!content_sized.is_border_box);
        assert_eq!(content_sized.difference, 4.0);
    }

    fn edge_strategy() -> impl Strategy<Value = EdgeValues> {
        (0.0f64..50.0, 0.0f64..50.0, 0.0f64..50.0, 0.0f64..50.0)
            .prop_map(|(t, r, b, l)| EdgeValues::new(t, r, b, l))
    }

    fn rect_strategy() -> impl Strategy<Value = RawRect> {
        (-500.0f64..500.0, -500.0f64..500.0, 0.0f64..1000.0, 0.0f64..1000.0)
            .prop_map(|(l, t, w, h)| RawRect::new(l, t, w, h))
    }

    proptest! {
        /// Property: the border box is the raw rectangle, untouched
        #[test]
        fn prop_border_box_is_raw_rect(
            raw in rect_strategy(),
            padding in edge_strategy(),
            border in edge_strategy(),
            margin in edge_strategy(),
        ) {
            let boxes = extract(raw, padding, border, margin);
            prop_assert_eq!(boxes.border_box, Rect::new(raw.left, raw.top, raw.width, raw.height));
        }

        /// Property: with non-negative edges the content box never outgrows the border box
        #[test]
        fn prop_content_box_fits_inside_border_box(
            raw in rect_strategy(),
            padding in edge_strategy(),
            border in edge_strategy(),
        ) {
            let boxes = extract(raw, padding, border, EdgeValues::default());
            prop_assert!(boxes.content_box.width <= boxes.border_box.width);
            prop_assert!(boxes.content_box.height <= boxes.border_box.height);
        }

        /// Property: widths are equal exactly when the horizontal insets are all zero
        #[test]
        fn prop_content_width_equal_iff_no_horizontal_insets(
            raw in rect_strategy(),
            pl in prop_oneof![Just(0.0f64), 0.5f64..20.0],
            pr in prop_oneof![Just(0.0f64), 0.5f64..20.0],
            bl in prop_oneof![Just(0.0f64), 0.5f64..20.0],
            br in prop_oneof![Just(0.0f64), 0.5f64..20.0],
        ) {
            let boxes = extract(
                raw,
                EdgeValues::new(0.0, pr, 0.0, pl),
                EdgeValues::new(0.0, br, 0.0, bl),
                EdgeValues::default(),
            );
            let insets_zero = pl == 0.0 && pr == 0.0 && bl == 0.0 && br == 0.0;
            prop_assert_eq!(boxes.content_box.width == boxes.border_box.width, insets_zero);
        }
    }
}
