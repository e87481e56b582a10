//! Viewport geometry and section visibility.
//!
//! Sections are laid out top to bottom in document coordinates (pixels or
//! terminal rows, the unit does not matter). Visibility is measured against a
//! band near the top of the viewport: `band_top` of the viewport height is cut
//! from the top and `band_bottom` from the bottom, like a root margin of
//! `-10% 0 -80% 0`.

use serde::{Deserialize, Serialize};

/// Position of one section in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionLayout {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// One visibility observation for a section, as delivered to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionVisibility {
    pub id: String,
    /// Section top edge relative to the viewport top. Negative once the
    /// section starts above the viewport.
    pub top: f64,
    /// Overlap with the band divided by the smaller of section height and
    /// band height, in `[0, 1]`.
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

impl SectionVisibility {
    pub fn intersecting(id: impl Into<String>, top: f64) -> Self {
        Self {
            id: id.into(),
            top,
            intersection_ratio: 1.0,
            is_intersecting: true,
        }
    }

    pub fn hidden(id: impl Into<String>, top: f64) -> Self {
        Self {
            id: id.into(),
            top,
            intersection_ratio: 0.0,
            is_intersecting: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityBand {
    /// Fraction of the viewport height excluded at the top.
    pub top: f64,
    /// Fraction of the viewport height excluded at the bottom.
    pub bottom: f64,
    /// Minimum intersection ratio for a section to count as intersecting.
    pub min_visible_ratio: f64,
}

impl Default for VisibilityBand {
    fn default() -> Self {
        Self {
            top: 0.10,
            bottom: 0.80,
            min_visible_ratio: 0.10,
        }
    }
}

impl VisibilityBand {
    /// Band edges for a viewport, in document coordinates.
    pub fn edges(&self, scroll_top: f64, viewport_height: f64) -> (f64, f64) {
        let start = scroll_top + viewport_height * self.top;
        let end = scroll_top + viewport_height * (1.0 - self.bottom);
        (start, end.max(start))
    }

    /// Visibility of every section for the given scroll position, in layout order.
    pub fn measure(
        &self,
        layouts: &[SectionLayout],
        scroll_top: f64,
        viewport_height: f64,
    ) -> Vec<SectionVisibility> {
        let (band_start, band_end) = self.edges(scroll_top, viewport_height);
        let band_height = band_end - band_start;

        layouts
            .iter()
            .map(|layout| {
                let overlap = (layout.bottom().min(band_end) - layout.top.max(band_start)).max(0.0);
                let basis = layout.height.min(band_height);
                let intersection_ratio = if basis > 0.0 {
                    (overlap / basis).min(1.0)
                } else {
                    0.0
                };
                SectionVisibility {
                    id: layout.id.clone(),
                    top: layout.top - scroll_top,
                    intersection_ratio,
                    is_intersecting: overlap > 0.0 && intersection_ratio >= self.min_visible_ratio,
                }
            })
            .collect()
    }
}

/// Scroll position that brings `layout` to `offset` units below the viewport top.
pub fn scroll_target(layout: &SectionLayout, offset: f64, max_scroll: f64) -> f64 {
    (layout.top - offset).clamp(0.0, max_scroll.max(0.0))
}
