use std::time::Instant;

use menu_core::progress::{max_scroll, scroll_progress};
use menu_core::{
    group_sections, ActiveSectionTracker, Catalog, Category, FilterPredicate, FilterState, MenuSection,
    SectionVisibility, Settings, VisibilityBand,
};
use tracing::{debug, info};

use crate::document::Document;
use crate::scroll::SmoothScroll;

/// Input modes for the TUI state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
}

/// Application state
pub struct App {
    pub mode: Mode,
    pub should_quit: bool,

    pub catalog: Catalog,
    pub filter: FilterState,

    // Scroll-spy
    pub tracker: ActiveSectionTracker,
    pub scroll: SmoothScroll,
    band: VisibilityBand,

    // Document geometry, refreshed on every filter change
    pub content_height: f64,
    pub viewport_height: f64,
}

impl App {
    pub fn new(catalog: Catalog, settings: &Settings) -> Self {
        let mut app = Self {
            mode: Mode::Browse,
            should_quit: false,
            catalog,
            filter: FilterState::default(),
            tracker: ActiveSectionTracker::from_settings(&settings.tracker),
            scroll: SmoothScroll::new(settings.navigation.scroll_offset, settings.ui.scroll_speed),
            band: settings.tracker.band(),
            content_height: 0.0,
            viewport_height: 0.0,
        };
        // Every category stays registered; filtering only changes what is rendered
        app.tracker.observe(app.catalog.section_ids());
        app.refresh_document();
        app
    }

    /// Sections for the current filter, in display order.
    pub fn sections(&self) -> Vec<MenuSection<'_>> {
        let result = self.filter.apply(&self.catalog.items);
        group_sections(&self.catalog, &result)
    }

    pub fn document(&self) -> Document<'_> {
        let result = self.filter.apply(&self.catalog.items);
        let sections = group_sections(&self.catalog, &result);
        Document::build(&self.catalog.restaurant, &sections)
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.catalog.category(self.tracker.current())
    }

    pub fn progress(&self) -> f64 {
        scroll_progress(self.scroll.offset, self.content_height, self.viewport_height)
    }

    /// Recompute section geometry after the filter changed. The scroll
    /// position is kept and only clamped to the new page length.
    pub fn refresh_document(&mut self) {
        let (layouts, height) = {
            let doc = self.document();
            let height = doc.height();
            (doc.layouts, height)
        };

        self.content_height = height;
        self.scroll.set_layouts(layouts);
        self.scroll
            .set_max_scroll(max_scroll(self.content_height, self.viewport_height));
    }

    /// Ids of the sections currently on the page, in display order.
    pub fn rendered_ids(&self) -> Vec<&str> {
        self.scroll.layouts().iter().map(|l| l.id.as_str()).collect()
    }

    pub fn is_rendered(&self, section_id: &str) -> bool {
        self.scroll.layouts().iter().any(|l| l.id == section_id)
    }

    /// Body height is only known once the frame is laid out.
    pub fn set_viewport_height(&mut self, height: u16) {
        let height = f64::from(height);
        if (height - self.viewport_height).abs() > f64::EPSILON {
            self.viewport_height = height;
            self.scroll
                .set_max_scroll(max_scroll(self.content_height, self.viewport_height));
        }
    }

    /// One animation frame: advance the scroll, fire the grace deadline and
    /// deliver a fresh visibility batch to the tracker.
    pub fn on_frame(&mut self, now: Instant) {
        self.scroll.animate(now);
        self.tracker.tick(now);

        if self.viewport_height <= 0.0 {
            return;
        }
        let mut batch = self
            .band
            .measure(self.scroll.layouts(), self.scroll.offset, self.viewport_height);
        // Sections filtered off the page are not visible anywhere
        for id in self.tracker.sections() {
            if !self.is_rendered(id) {
                batch.push(SectionVisibility::hidden(id.as_str(), f64::INFINITY));
            }
        }
        self.tracker.on_visibility(batch, now);
    }

    // Navigation pills

    /// Only sections on the page can be jumped to.
    pub fn activate(&mut self, section_id: &str, now: Instant) -> bool {
        if !self.is_rendered(section_id) {
            return false;
        }
        self.tracker.activate(section_id, now, &mut self.scroll)
    }

    /// Activate the pill at `index` among the rendered sections.
    pub fn activate_index(&mut self, index: usize, now: Instant) -> bool {
        match self.scroll.layouts().get(index).map(|l| l.id.clone()) {
            Some(id) => self.activate(&id, now),
            None => false,
        }
    }

    pub fn activate_next(&mut self, now: Instant) -> bool {
        let len = self.scroll.layouts().len();
        if len == 0 {
            return false;
        }
        let next = self.active_index().map(|i| (i + 1) % len).unwrap_or(0);
        self.activate_index(next, now)
    }

    pub fn activate_prev(&mut self, now: Instant) -> bool {
        let len = self.scroll.layouts().len();
        if len == 0 {
            return false;
        }
        let prev = self.active_index().map(|i| (i + len - 1) % len).unwrap_or(len - 1);
        self.activate_index(prev, now)
    }

    /// Position of the active section among the rendered ones.
    fn active_index(&self) -> Option<usize> {
        let current = self.tracker.current();
        self.scroll.layouts().iter().position(|l| l.id == current)
    }

    // Scrolling

    pub fn scroll_by(&mut self, rows: f64) {
        self.scroll.scroll_by(rows);
    }

    pub fn page_down(&mut self) {
        self.scroll.scroll_by((self.viewport_height - 2.0).max(1.0));
    }

    pub fn page_up(&mut self) {
        self.scroll.scroll_by(-(self.viewport_height - 2.0).max(1.0));
    }

    pub fn scroll_home(&mut self) {
        self.scroll.jump_to(0.0);
    }

    pub fn scroll_end(&mut self) {
        self.scroll.jump_to(self.content_height);
    }

    // Search and filters

    pub fn push_query(&mut self, c: char) {
        self.filter.query.push(c);
        self.on_filter_changed();
    }

    pub fn pop_query(&mut self) {
        if self.filter.query.pop().is_some() {
            self.on_filter_changed();
        }
    }

    pub fn set_predicate(&mut self, predicate: FilterPredicate) {
        if self.filter.predicate != predicate {
            self.filter.predicate = predicate;
            self.on_filter_changed();
        }
    }

    pub fn next_predicate(&mut self) {
        self.set_predicate(self.filter.predicate.next());
    }

    pub fn prev_predicate(&mut self) {
        self.set_predicate(self.filter.predicate.prev());
    }

    pub fn clear_filters(&mut self) {
        if self.filter != FilterState::default() {
            self.filter.clear();
            self.on_filter_changed();
        }
    }

    fn on_filter_changed(&mut self) {
        debug!(query = %self.filter.query, predicate = %self.filter.predicate, "Filter changed");
        self.refresh_document();
    }

    pub fn quit(&mut self) {
        info!("Shutting down menu");
        self.tracker.disconnect();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        let mut app = App::new(Catalog::reference().unwrap(), &Settings::default());
        app.set_viewport_height(30);
        app
    }

    fn settle(app: &mut App, start: Instant) -> Instant {
        let mut now = start;
        for _ in 0..200 {
            now += Duration::from_millis(16);
            app.on_frame(now);
        }
        now
    }

    #[test]
    fn test_starts_on_first_section() {
        let app = app();
        assert_eq!(app.tracker.current(), "starters");
        assert_eq!(app.tracker.sections().len(), 6);
        assert_eq!(app.progress(), 0.0);
    }

    #[test]
    fn test_nav_tap_scrolls_and_keeps_selection() {
        let mut app = app();
        let start = Instant::now();
        assert!(app.activate("desserts", start));
        assert_eq!(app.tracker.current(), "desserts");
        assert!(app.scroll.is_animating());

        let mut now = start;
        for _ in 0..30 {
            now += Duration::from_millis(16);
            app.on_frame(now);
            assert_eq!(app.tracker.current(), "desserts");
        }

        settle(&mut app, now);
        assert_eq!(app.tracker.current(), "desserts");
        assert!(app.progress() > 0.0);
    }

    #[test]
    fn test_user_scroll_moves_active_section() {
        let mut app = app();
        let start = Instant::now();
        let veg_top = app.scroll.layouts()[1].top;
        app.scroll.jump_to(veg_top);
        app.on_frame(start);
        assert_eq!(app.tracker.current(), "veg");
    }

    #[test]
    fn test_filter_keeps_every_category_registered() {
        let mut app = app();
        for c in "chicken".chars() {
            app.push_query(c);
        }
        assert_eq!(app.tracker.sections().len(), 6);
        assert_eq!(app.rendered_ids(), vec!["nonveg"]);

        // the only section on the page takes over on the next frame
        app.on_frame(Instant::now());
        assert_eq!(app.tracker.current(), "nonveg");

        app.clear_filters();
        assert_eq!(app.rendered_ids().len(), 6);
        assert_eq!(app.tracker.sections().len(), 6);
    }

    #[test]
    fn test_filter_change_keeps_scroll_position() {
        let mut app = app();
        app.scroll.jump_to(10.0);
        app.next_predicate();
        assert_eq!(app.filter.predicate, FilterPredicate::VegOnly);
        assert_eq!(app.scroll.offset, 10.0);

        // a shorter page clamps instead of resetting
        app.scroll_end();
        for c in "pizza".chars() {
            app.push_query(c);
        }
        assert_eq!(app.scroll.offset, 0.0);
        assert_eq!(app.progress(), 0.0);
    }

    #[test]
    fn test_tab_cycles_pills() {
        let mut app = app();
        let now = Instant::now();
        assert!(app.activate_next(now));
        assert_eq!(app.tracker.current(), "veg");
        assert!(app.activate_prev(now));
        assert!(app.activate_prev(now));
        assert_eq!(app.tracker.current(), "special");
    }

    #[test]
    fn test_no_results_keeps_valid_active_section() {
        let mut app = app();
        let now = Instant::now();
        app.activate("veg", now);
        for c in "pizza".chars() {
            app.push_query(c);
        }
        assert!(app.sections().is_empty());
        assert!(app.rendered_ids().is_empty());

        app.on_frame(now + Duration::from_secs(2));
        assert_eq!(app.tracker.current(), "veg");
        assert!(app.active_category().is_some());
        assert!(!app.activate_next(now));
        assert!(!app.activate("desserts", now));
        assert_eq!(app.tracker.current(), "veg");
    }

    #[test]
    fn test_quit_disconnects_tracker() {
        let mut app = app();
        app.quit();
        assert!(app.should_quit);
        assert!(app.tracker.sections().is_empty());
    }
}
