#![forbid(unsafe_code)]

//! Scroll geometry read back from the host.

/// Scroll position and extent of a scroll container (or the window).
///
/// Units are CSS pixels as reported by the host. For the window, only
/// `scroll_top` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ScrollMetrics {
    /// Vertical scroll offset.
    pub scroll_top: f64,
    /// Horizontal scroll offset.
    pub scroll_left: f64,
    /// Total scrollable content width.
    pub scroll_width: f64,
    /// Visible width.
    pub client_width: f64,
}

impl ScrollMetrics {
    /// Metrics for a vertically scrolled window.
    #[must_use]
    pub const fn vertical(scroll_top: f64) -> Self {
        Self {
            scroll_top,
            scroll_left: 0.0,
            scroll_width: 0.0,
            client_width: 0.0,
        }
    }

    /// Metrics for a horizontal strip.
    #[must_use]
    pub const fn horizontal(scroll_left: f64, scroll_width: f64, client_width: f64) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left,
            scroll_width,
            client_width,
        }
    }

    /// Whether content is hidden past the leading edge, allowing `slack` pixels.
    #[inline]
    #[must_use]
    pub fn overflows_start(&self, slack: f64) -> bool {
        self.scroll_left > slack
    }

    /// Whether content is hidden past the trailing edge, allowing `slack` pixels.
    #[inline]
    #[must_use]
    pub fn overflows_end(&self, slack: f64) -> bool {
        self.scroll_left < self.scroll_width - self.client_width - slack
    }

    /// Largest reachable `scroll_left`.
    #[inline]
    #[must_use]
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_at_start_has_no_leading_overflow() {
        let m = ScrollMetrics::horizontal(0.0, 1200.0, 400.0);
        assert!(!m.overflows_start(10.0));
        assert!(m.overflows_end(10.0));
    }

    #[test]
    fn strip_at_end_has_no_trailing_overflow() {
        let m = ScrollMetrics::horizontal(800.0, 1200.0, 400.0);
        assert!(m.overflows_start(10.0));
        assert!(!m.overflows_end(10.0));
        assert_eq!(m.max_scroll_left(), 800.0);
    }

    #[test]
    fn slack_band_hides_both_edges() {
        let m = ScrollMetrics::horizontal(5.0, 410.0, 400.0);
        assert!(!m.overflows_start(10.0));
        assert!(!m.overflows_end(10.0));
    }
}
