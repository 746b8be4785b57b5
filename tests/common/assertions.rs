//! Test assertion helpers
//!
//! Provides utilities for robust assertions over pixel values read back from
//! JSON artifacts.

use serde_json::Value;

/// Assert that two pixel values are approximately equal
///
/// # Examples
///
/// ```
/// # use layout_parity_tests::assertions::assert_px_eq;
/// assert_px_eq(box_x, 17.0, 1e-9);
/// ```
#[allow(dead_code)]
pub fn assert_px_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= epsilon,
        "Pixel values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Assert that a JSON rectangle `{x, y, width, height}` has the given values
#[allow(dead_code)]
pub fn assert_rect(value: &Value, expected: [f64; 4]) {
    let fields = ["x", "y", "width", "height"];
    for (field, want) in fields.iter().zip(expected) {
        let got = value[*field]
            .as_f64()
            .unwrap_or_else(|| panic!("rect field {} missing in {}", field, value));
        assert_px_eq(got, want, 1e-9);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_px_eq_pass() {
        assert_px_eq(17.0, 17.0, 0.0);
        assert_px_eq(0.1 + 0.2, 0.3, 1e-9);
    }

    #[test]
    #[should_panic(expected = "Pixel values not approximately equal")]
    fn test_assert_px_eq_fail() {
        assert_px_eq(17.0, 18.0, 0.5);
    }

    #[test]
    fn test_assert_rect_pass() {
        let value = serde_json::json!({"x": 17, "y": 27, "width": 86, "height": 36});
        assert_rect(&value, [17.0, 27.0, 86.0, 36.0]);
    }
}
