use menu_core::FilterPredicate;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::{App, Mode};
use crate::document::Row;
use crate::theme::Theme;

fn screen_layout(area: Rect) -> [Rect; 5] {
    Layout::vertical([
        Constraint::Length(1), // Scroll progress
        Constraint::Length(3), // Category pills
        Constraint::Length(3), // Search + filter pills
        Constraint::Min(5),    // Menu body
        Constraint::Length(1), // Footer
    ])
    .areas(area)
}

/// Rows of menu content visible inside the body border.
pub fn body_height(area: Rect) -> u16 {
    screen_layout(area)[3].height.saturating_sub(2)
}

pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::for_category(app.active_category());
    let [progress, nav, search, body, footer] = screen_layout(frame.area());

    render_progress(frame, app, &theme, progress);
    render_nav(frame, app, &theme, nav);
    render_search(frame, app, &theme, search);
    render_body(frame, app, &theme, body);
    render_footer(frame, app, &theme, footer);
}

fn render_progress(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let ratio = app.progress().clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(theme.accent_style())
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, area);
}

fn render_nav(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let rendered = app.rendered_ids();
    let mut spans = Vec::new();

    for category in app.catalog.sorted_categories() {
        // Categories hidden by the filter stay visible but inert
        let Some(index) = rendered.iter().position(|id| *id == category.id.as_str()) else {
            spans.push(Span::styled(format!(" {} {} ", category.icon, category.name), theme.muted));
            spans.push(Span::raw(" "));
            continue;
        };

        let style = if category.id == app.tracker.current() {
            theme.pill_selected()
        } else {
            theme.pill()
        };
        spans.push(Span::styled(
            format!(" {} {} {} ", index + 1, category.icon, category.name),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" {} ", app.catalog.restaurant.name))
        .title_style(theme.accent_bold());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_search(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let searching = app.mode == Mode::Search;
    let mut spans = vec![Span::raw(" 🔍 ")];

    if app.filter.query.is_empty() && !searching {
        spans.push(Span::styled("Search dishes...", theme.muted));
    } else {
        spans.push(Span::styled(app.filter.query.clone(), theme.normal));
        if searching {
            spans.push(Span::styled("▏", theme.accent_style()));
        }
    }
    spans.push(Span::raw("   "));

    for predicate in FilterPredicate::all() {
        let style = if predicate == app.filter.predicate {
            theme.pill_selected()
        } else {
            theme.pill()
        };
        spans.push(Span::styled(format!(" {} ", predicate.label()), style));
        spans.push(Span::raw(" "));
    }

    let border = if searching { theme.accent_style() } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Search ")
        .title_style(theme.title);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_body(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let doc = app.document();
    let width = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = doc.rows.iter().map(|row| row_line(*row, theme, width)).collect();

    let title = match app.active_category() {
        Some(category) => format!(" {} {} ", category.icon, category.name),
        None => " Menu ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .title(title)
        .title_style(theme.accent_bold());

    let offset = app.scroll.offset.round().clamp(0.0, f64::from(u16::MAX)) as u16;
    frame.render_widget(Paragraph::new(lines).block(block).scroll((offset, 0)), area);
}

fn row_line<'a>(row: Row<'a>, theme: &Theme, width: usize) -> Line<'a> {
    match row {
        Row::Blank => Line::default(),
        Row::Title(info) => Line::from(Span::styled(info.name.as_str(), theme.accent_bold()))
            .alignment(Alignment::Center),
        Row::Tagline(info) => {
            Line::from(Span::styled(info.tagline.as_str(), theme.muted)).alignment(Alignment::Center)
        }
        Row::SectionHeader(category, count) => Line::from(vec![
            Span::styled(format!(" {} {}", category.icon, category.name), theme.accent_bold()),
            Span::styled(format!("  ({} dishes)", count), theme.muted),
        ]),
        Row::Rule => Line::from(Span::styled(
            format!(" {}", "─".repeat(width.saturating_sub(2))),
            theme.accent_style(),
        )),
        Row::Headline(item) => {
            let marker = if item.is_veg { theme.veg } else { theme.nonveg };
            let mut spans = vec![
                Span::styled("   ● ", marker),
                Span::styled(item.name.as_str(), theme.normal.add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(item.formatted_price(), theme.price),
            ];
            if item.is_best_seller {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(" Bestseller ", theme.badge));
            }
            if item.is_chefs_pick {
                spans.push(Span::raw("  "));
                spans.push(Span::styled("👨‍🍳 Chef's Pick", theme.accent_style()));
            }
            if item.is_spicy {
                spans.push(Span::raw("  "));
                spans.push(Span::styled("🌶 Spicy", theme.nonveg));
            }
            Line::from(spans)
        }
        Row::Description(item) => Line::from(vec![
            Span::raw("     "),
            Span::styled(item.description.as_str(), theme.muted),
        ]),
        Row::NoResults => Line::from(Span::styled("🔍 No dishes found", theme.title)).alignment(Alignment::Center),
        Row::NoResultsHint => Line::from(Span::styled(
            "Try a different search or filter (Esc clears)",
            theme.muted,
        ))
        .alignment(Alignment::Center),
    }
}

fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let hints: &[(&str, &str)] = match app.mode {
        Mode::Browse => &[
            (" ↑/↓ ", "Scroll"),
            (" Tab/1-9 ", "Category"),
            (" / ", "Search"),
            (" f ", "Filter"),
            (" Esc ", "Clear"),
            (" q ", "Quit"),
        ],
        Mode::Search => &[(" Enter ", "Done"), (" Esc ", "Clear search")],
    };

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme.key_hint));
        spans.push(Span::styled(*label, theme.muted));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}
