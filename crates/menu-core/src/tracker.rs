//! ============================================================================
//! ACTIVE SECTION TRACKER
//! ============================================================================
//!
//! Reduces a stream of section visibility observations to one active section
//! id, used for the navigation highlight and the background accent.
//!
//! Two writers compete for the active section: passive visibility updates
//! while the user scrolls, and forced navigation via [`ActiveSectionTracker::activate`].
//! A forced activation opens a grace window during which passive updates are
//! recorded but do not change the active section, so the smooth scroll toward
//! the chosen section cannot drag the highlight through the sections it
//! passes.
//!
//! ## State machine
//! - `Idle` → passive updates recompute the active section.
//! - `Suppressed { expires_at }` → passive updates are recorded only.
//!   `activate` re-arms the deadline, [`ActiveSectionTracker::tick`] or the
//!   next update after the deadline returns to `Idle`, `observe` and
//!   `disconnect` cancel it.
//!
//! Time is passed in explicitly so the window can be driven without sleeping.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::TrackerSettings;
use crate::viewport::SectionVisibility;

pub const DEFAULT_GRACE_WINDOW: Duration = Duration::from_millis(1000);

/// Performs the smooth scroll that accompanies a forced activation.
#[cfg_attr(test, mockall::automock)]
pub trait ScrollDriver {
    fn scroll_to_section(&mut self, section_id: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Suppressed { expires_at: Instant },
}

#[derive(Debug)]
pub struct ActiveSectionTracker {
    /// Registered sections, in registration order (ties resolve to the earlier one)
    section_ids: Vec<String>,
    /// Last known visibility per registered section
    visibility: HashMap<String, SectionVisibility>,
    active: String,
    state: TrackerState,
    grace_window: Duration,
}

impl Default for ActiveSectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_WINDOW)
    }
}

impl ActiveSectionTracker {
    pub fn new(grace_window: Duration) -> Self {
        Self {
            section_ids: Vec::new(),
            visibility: HashMap::new(),
            active: String::new(),
            state: TrackerState::Idle,
            grace_window,
        }
    }

    pub fn from_settings(settings: &TrackerSettings) -> Self {
        Self::new(settings.grace_window())
    }

    /// Register the sections to track, replacing any earlier registration.
    ///
    /// The active section resets to the first id (empty when none) and a
    /// pending grace window is cancelled.
    pub fn observe<I, S>(&mut self, section_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_ids = section_ids.into_iter().map(Into::into).collect();
        self.visibility.clear();
        self.active = self.section_ids.first().cloned().unwrap_or_default();
        self.state = TrackerState::Idle;
        debug!(
            sections = self.section_ids.len(),
            active = %self.active,
            "Tracker observing sections"
        );
    }

    pub fn current(&self) -> &str {
        &self.active
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn sections(&self) -> &[String] {
        &self.section_ids
    }

    pub fn grace_window(&self) -> Duration {
        self.grace_window
    }

    pub fn is_suppressed(&self, now: Instant) -> bool {
        matches!(self.state, TrackerState::Suppressed { expires_at } if now < expires_at)
    }

    /// Force `section_id` active and ask `driver` to scroll to it.
    ///
    /// Returns `false` (and does nothing) when the id is not registered.
    pub fn activate(&mut self, section_id: &str, now: Instant, driver: &mut dyn ScrollDriver) -> bool {
        if !self.section_ids.iter().any(|id| id == section_id) {
            warn!(section = %section_id, "Ignoring activation of unregistered section");
            return false;
        }

        let expires_at = now + self.grace_window;
        self.active = section_id.to_string();
        self.state = TrackerState::Suppressed { expires_at };
        debug!(section = %section_id, grace_ms = self.grace_window.as_millis() as u64, "Section activated");

        driver.scroll_to_section(section_id);
        true
    }

    /// Fire the grace deadline if it has passed. Returns `true` on the
    /// `Suppressed` → `Idle` transition.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            TrackerState::Suppressed { expires_at } if now >= expires_at => {
                self.state = TrackerState::Idle;
                debug!(active = %self.active, "Grace window elapsed, passive tracking resumed");
                true
            }
            _ => false,
        }
    }

    /// Feed one batch of visibility observations.
    ///
    /// Observations for unregistered sections are dropped. While suppressed
    /// the batch is only recorded. Otherwise the active section becomes the
    /// intersecting section with the smallest top offset over everything
    /// currently known, so the outcome does not depend on delivery order.
    /// With nothing intersecting the previous section stays active.
    ///
    /// Returns `true` when the active section changed.
    pub fn on_visibility<I>(&mut self, batch: I, now: Instant) -> bool
    where
        I: IntoIterator<Item = SectionVisibility>,
    {
        self.tick(now);

        for entry in batch {
            if self.section_ids.iter().any(|id| *id == entry.id) {
                self.visibility.insert(entry.id.clone(), entry);
            }
        }

        if self.is_suppressed(now) {
            return false;
        }

        let topmost = self
            .section_ids
            .iter()
            .filter_map(|id| self.visibility.get(id))
            .filter(|v| v.is_intersecting)
            .min_by(|a, b| a.top.total_cmp(&b.top));

        match topmost {
            Some(entry) if entry.id != self.active => {
                debug!(from = %self.active, to = %entry.id, "Active section changed");
                self.active = entry.id.clone();
                true
            }
            _ => false,
        }
    }

    /// Release all registrations and cancel a pending grace window.
    pub fn disconnect(&mut self) {
        self.section_ids.clear();
        self.visibility.clear();
        self.active.clear();
        self.state = TrackerState::Idle;
        debug!("Tracker disconnected");
    }
}
