use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::app::{App, Mode};

/// Poll for terminal events with timeout
pub fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle one terminal event
pub fn handle_event(app: &mut App, event: Event, now: Instant) {
    if let Event::Key(key) = event {
        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            return;
        }

        match app.mode {
            Mode::Browse => handle_browse(app, key, now),
            Mode::Search => handle_search(app, key),
        }
    }
    // Resize is picked up on the next draw
}

fn handle_browse(app: &mut App, key: KeyEvent, now: Instant) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => {
            if app.filter.is_narrowing() {
                app.clear_filters();
            } else {
                app.quit();
            }
        }

        // Navigation pills
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            app.activate_next(now);
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            app.activate_prev(now);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.activate_index(index, now);
        }

        // Scrolling
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1.0),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1.0),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_home(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_end(),

        // Search and filters
        KeyCode::Char('/') => app.mode = Mode::Search,
        KeyCode::Char('f') => app.next_predicate(),
        KeyCode::Char('F') => app.prev_predicate(),
        KeyCode::Char('c') => app.clear_filters(),
        _ => {}
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.push_query(c),
        KeyCode::Backspace => app.pop_query(),
        KeyCode::Enter => app.mode = Mode::Browse,
        KeyCode::Esc => {
            app.clear_filters();
            app.mode = Mode::Browse;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::{Catalog, FilterPredicate, Settings};

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::from(code)), Instant::now());
    }

    fn app() -> App {
        App::new(Catalog::reference().unwrap(), &Settings::default())
    }

    #[test]
    fn test_search_mode_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);

        for c in "naan".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.filter.query, "naan");

        // 'q' is text while searching
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.filter.query, "naan");
    }

    #[test]
    fn test_escape_clears_before_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter.predicate, FilterPredicate::VegOnly);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.filter.predicate, FilterPredicate::All);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_digit_activates_pill() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.tracker.current(), "desserts");

        // out of range
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.tracker.current(), "desserts");
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app();
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_event(&mut app, Event::Key(key), Instant::now());
        assert!(!app.should_quit);
    }
}
