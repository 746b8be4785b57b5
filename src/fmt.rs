//! Shared formatting utilities for pixel values and console output

use console::Emoji;
use std::sync::atomic::{AtomicBool, Ordering};

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Ruler emoji for box measurements
pub const RULER: Emoji = Emoji("📐", "#");

/// Sparkles emoji for completion/success
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Microscope emoji for analysis/inspection
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

static EMOJI_DISABLED: AtomicBool = AtomicBool::new(false);

/// Force plain-text fallbacks for every icon (`--no-emoji`)
pub fn disable_emoji() {
    EMOJI_DISABLED.store(true, Ordering::Relaxed);
}

/// Render an emoji, or its fallback when emoji are disabled or unsupported
pub fn icon(emoji: Emoji<'_, '_>) -> String {
    if EMOJI_DISABLED.load(Ordering::Relaxed) {
        emoji.1.to_string()
    } else {
        emoji.to_string()
    }
}

/// Format a length in pixels with two decimals
///
/// # Examples
///
/// ```
/// use layout_parity::fmt::format_px;
///
/// assert_eq!(format_px(61.44), "61.44px");
/// assert_eq!(format_px(-2.0), "-2.00px");
/// ```
pub fn format_px(value: f64) -> String {
    format!("{:.2}px", value)
}

/// Check or cross icon for a match flag
pub fn match_icon(matched: bool) -> String {
    if matched {
        icon(CHECKMARK)
    } else {
        icon(CROSSMARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_px_rounds_to_two_decimals() {
        assert_eq!(format_px(0.0), "0.00px");
        assert_eq!(format_px(925.0), "925.00px");
        assert_eq!(format_px(0.4), "0.40px");
    }

    #[test]
    fn test_icon_falls_back_when_disabled() {
        disable_emoji();
        assert_eq!(icon(CHECKMARK), "[OK]");
        assert_eq!(match_icon(false), "[FAIL]");
    }
}
