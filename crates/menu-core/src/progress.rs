//! Scroll progress for the reading indicator at the top of the page.

/// Fraction of the scrollable distance already scrolled, in `[0, 1]`.
///
/// Content that fits in the viewport has nothing to scroll and reports 0.
pub fn scroll_progress(scroll_top: f64, content_height: f64, viewport_height: f64) -> f64 {
    let scrollable = content_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Largest valid scroll offset.
pub fn max_scroll(content_height: f64, viewport_height: f64) -> f64 {
    (content_height - viewport_height).max(0.0)
}
