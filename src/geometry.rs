//! Geometric value types shared by extraction, comparison and snapshots
//!
//! All lengths are `f64` device-independent pixels. Nothing here rounds or
//! clamps: the comparator applies tolerance downstream instead.

use serde::{Deserialize, Serialize};

/// A positioned rectangle `{x, y, width, height}`
///
/// # Examples
///
/// ```
/// use layout_parity::geometry::Rect;
///
/// let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.right(), 110.0);
/// assert_eq!(rect.bottom(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner
    pub x: f64,
    /// Vertical position of the top-left corner
    pub y: f64,
    /// Width of the rectangle
    pub width: f64,
    /// Height of the rectangle
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its origin and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

impl From<RawRect> for Rect {
    fn from(raw: RawRect) -> Self {
        Self::new(raw.left, raw.top, raw.width, raw.height)
    }
}

/// Viewport-relative geometry as reported by a "bounding box of rendered
/// content" primitive
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRect {
    /// Left edge relative to the viewport
    pub left: f64,
    /// Top edge relative to the viewport
    pub top: f64,
    /// Width of the rendered box
    pub width: f64,
    /// Height of the rendered box
    pub height: f64,
}

impl RawRect {
    /// Create a raw rectangle
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge relative to the viewport
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge relative to the viewport
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// One side of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top side
    Top,
    /// Right side
    Right,
    /// Bottom side
    Bottom,
    /// Left side
    Left,
}

impl Side {
    /// All sides in CSS shorthand order
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Lowercase CSS keyword for this side
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

/// Which box-model area a set of edge values describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Padding area
    Padding,
    /// Border area
    Border,
    /// Margin area
    Margin,
}

impl EdgeKind {
    /// Resolved-style property name holding this edge on `side`
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_parity::geometry::{EdgeKind, Side};
    ///
    /// assert_eq!(EdgeKind::Padding.property(Side::Top), "padding-top");
    /// assert_eq!(EdgeKind::Border.property(Side::Left), "border-left-width");
    /// ```
    pub fn property(&self, side: Side) -> String {
        match self {
            EdgeKind::Padding => format!("padding-{}", side.as_str()),
            EdgeKind::Border => format!("border-{}-width", side.as_str()),
            EdgeKind::Margin => format!("margin-{}", side.as_str()),
        }
    }

    /// Lowercase name of this edge kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Padding => "padding",
            EdgeKind::Border => "border",
            EdgeKind::Margin => "margin",
        }
    }
}

/// Four-sided resolved lengths for padding, border or margin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeValues {
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
    /// Left edge
    pub left: f64,
}

impl EdgeValues {
    /// Create edge values in CSS shorthand order
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on all four sides
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Value on a single side
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Sum of left and right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Sides holding a negative value, in shorthand order
    pub fn negative_sides(&self) -> Vec<(Side, f64)> {
        Side::ALL
            .iter()
            .map(|&side| (side, self.get(side)))
            .filter(|(_, value)| *value < 0.0)
            .collect()
    }

    /// Resolve the four sides of `kind` through a style lookup
    ///
    /// Absent or non-numeric style values resolve to 0: a legitimately unset
    /// CSS edge contributes nothing to the box.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_parity::geometry::{EdgeKind, EdgeValues};
    ///
    /// let padding = EdgeValues::resolve(EdgeKind::Padding, |prop| match prop {
    ///     "padding-top" => Some("5px".to_string()),
    ///     "padding-left" => Some("auto".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(padding, EdgeValues::new(5.0, 0.0, 0.0, 0.0));
    /// ```
    pub fn resolve<F>(kind: EdgeKind, mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut read = |side: Side| {
            lookup(&kind.property(side))
                .and_then(|value| parse_css_px(&value))
                .unwrap_or(0.0)
        };
        Self {
            top: read(Side::Top),
            right: read(Side::Right),
            bottom: read(Side::Bottom),
            left: read(Side::Left),
        }
    }
}

/// Document scroll position at capture time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    /// Horizontal scroll in pixels
    pub x: f64,
    /// Vertical scroll in pixels
    pub y: f64,
}

/// Page-absolute rectangle of an element, with the raw viewport geometry kept
/// alongside
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRect {
    /// Page x (viewport left + scroll x)
    pub x: f64,
    /// Page y (viewport top + scroll y)
    pub y: f64,
    /// Viewport-relative x
    pub viewport_x: f64,
    /// Viewport-relative y
    pub viewport_y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Page top edge
    pub top: f64,
    /// Page right edge
    pub right: f64,
    /// Page bottom edge
    pub bottom: f64,
    /// Page left edge
    pub left: f64,
    /// Viewport top edge
    pub viewport_top: f64,
    /// Viewport right edge
    pub viewport_right: f64,
    /// Viewport bottom edge
    pub viewport_bottom: f64,
    /// Viewport left edge
    pub viewport_left: f64,
}

impl PageRect {
    /// Translate viewport geometry into page coordinates
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_parity::geometry::{PageRect, RawRect, ScrollOffset};
    ///
    /// let page = PageRect::from_viewport(
    ///     RawRect::new(10.0, 20.0, 100.0, 50.0),
    ///     ScrollOffset { x: 0.0, y: 300.0 },
    /// );
    /// assert_eq!(page.y, 320.0);
    /// assert_eq!(page.viewport_y, 20.0);
    /// assert_eq!(page.bottom, 370.0);
    /// ```
    pub fn from_viewport(raw: RawRect, scroll: ScrollOffset) -> Self {
        Self {
            x: raw.left + scroll.x,
            y: raw.top + scroll.y,
            viewport_x: raw.left,
            viewport_y: raw.top,
            width: raw.width,
            height: raw.height,
            top: raw.top + scroll.y,
            right: raw.right() + scroll.x,
            bottom: raw.bottom() + scroll.y,
            left: raw.left + scroll.x,
            viewport_top: raw.top,
            viewport_right: raw.right(),
            viewport_bottom: raw.bottom(),
            viewport_left: raw.left,
        }
    }

    /// The page-coordinate box as a plain [`Rect`]
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Parse the leading numeric part of a CSS length the way `parseFloat` does
///
/// Leading whitespace is skipped and any unit suffix ignored. Returns `None`
/// when no number is present (`"auto"`, `""`, `"px"`).
///
/// # Examples
///
/// ```
/// use layout_parity::geometry::parse_css_px;
///
/// assert_eq!(parse_css_px("12.5px"), Some(12.5));
/// assert_eq!(parse_css_px("  -3px"), Some(-3.0));
/// assert_eq!(parse_css_px(".5em"), Some(0.5));
/// assert_eq!(parse_css_px("auto"), None);
/// ```
pub fn parse_css_px(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit ("1e" parses as 1).
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
