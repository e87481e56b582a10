use menu_core::Category;
use ratatui::style::{Color, Modifier, Style};

/// Fallback accent when no category is active or its colour is unreadable
const DEFAULT_ACCENT: Color = Color::Rgb(0xd9, 0x77, 0x06);

/// Theme tokens for consistent styling across the TUI
pub struct Theme {
    pub title: Style,
    pub border: Style,
    pub normal: Style,
    pub muted: Style,
    pub price: Style,
    pub veg: Style,
    pub nonveg: Style,
    pub badge: Style,
    pub key_hint: Style,
    /// Accent of the active category; drives borders, pills and the gauge
    pub accent: Color,
}

impl Theme {
    pub fn for_category(category: Option<&Category>) -> Self {
        let accent = category.map(accent_color).unwrap_or(DEFAULT_ACCENT);
        Self {
            accent,
            ..Self::default()
        }
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }

    /// Filled pill for the selected entry of a pill row
    pub fn pill_selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn pill(&self) -> Style {
        self.normal
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            normal: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::DarkGray),
            price: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            veg: Style::default().fg(Color::Green),
            nonveg: Style::default().fg(Color::Red),
            badge: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            accent: DEFAULT_ACCENT,
        }
    }
}

pub fn accent_color(category: &Category) -> Color {
    category
        .accent_rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(DEFAULT_ACCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_follows_category() {
        let category = Category::new("veg", "Vegetarian", "🥬", "#16a34a", 2);
        let theme = Theme::for_category(Some(&category));
        assert_eq!(theme.accent, Color::Rgb(0x16, 0xa3, 0x4a));
    }

    #[test]
    fn test_accent_fallback() {
        assert_eq!(Theme::for_category(None).accent, DEFAULT_ACCENT);
        let broken = Category::new("x", "Broken", "?", "not-a-colour", 9);
        assert_eq!(accent_color(&broken), DEFAULT_ACCENT);
    }
}
