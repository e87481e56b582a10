//! ============================================================================
//! SMOOTH SCROLL
//! ============================================================================
//!
//! Scroll position of the document viewport, animated toward a target.
//!
//! User scrolling (keys) moves `offset` and `target` together. Navigation taps
//! go through [`ActiveSectionTracker::activate`](menu_core::ActiveSectionTracker::activate),
//! which calls [`ScrollDriver::scroll_to_section`]; that only moves `target`
//! and [`SmoothScroll::animate`] eases `offset` toward it frame by frame.
//!
//! Formula: `offset += (target - offset) * speed * dt` (ease-out, frame-rate
//! independent), snapping once within half a row.

use std::time::Instant;

use menu_core::viewport::scroll_target;
use menu_core::{ScrollDriver, SectionLayout};
use tracing::debug;

pub struct SmoothScroll {
    pub offset: f64,
    pub target: f64,
    /// Current section positions; replaced whenever the document changes
    layouts: Vec<SectionLayout>,
    max_scroll: f64,
    /// Rows kept above a section when jumping to it
    nav_offset: f64,
    speed: f64,
    last_update: Option<Instant>,
}

impl SmoothScroll {
    pub fn new(nav_offset: f64, speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            layouts: Vec::new(),
            max_scroll: 0.0,
            nav_offset,
            speed,
            last_update: None,
        }
    }

    pub fn set_layouts(&mut self, layouts: Vec<SectionLayout>) {
        self.layouts = layouts;
    }

    pub fn layouts(&self) -> &[SectionLayout] {
        &self.layouts
    }

    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = max_scroll.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_scroll);
        self.target = self.target.clamp(0.0, self.max_scroll);
    }

    /// Immediate scroll by `delta` rows (user scroll, no animation).
    pub fn scroll_by(&mut self, delta: f64) {
        self.jump_to(self.offset + delta);
    }

    pub fn jump_to(&mut self, position: f64) {
        self.offset = position.clamp(0.0, self.max_scroll);
        self.target = self.offset;
    }

    pub fn is_animating(&self) -> bool {
        (self.target - self.offset).abs() > f64::EPSILON
    }

    /// Advance the animation. Returns `true` while still moving.
    pub fn animate(&mut self, now: Instant) -> bool {
        let delta = self
            .last_update
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.016);
        self.last_update = Some(now);

        let diff = self.target - self.offset;
        if diff.abs() > 0.5 {
            // never overshoot on a long frame
            let step = (self.speed * delta).min(1.0);
            self.offset += diff * step;
            true
        } else {
            self.offset = self.target;
            false
        }
    }
}

impl ScrollDriver for SmoothScroll {
    fn scroll_to_section(&mut self, section_id: &str) {
        if let Some(layout) = self.layouts.iter().find(|l| l.id == section_id) {
            self.target = scroll_target(layout, self.nav_offset, self.max_scroll);
            debug!(section = %section_id, target = self.target, "Smooth scroll started");
        }
    }
}
