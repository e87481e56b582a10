//! Row model of the scrolling menu page.
//!
//! The page is a hero header followed by one section per category: a header,
//! a rule, then every dish (headline, description, spacer). Rendering and
//! section geometry both come from [`Document::build`], so the positions fed
//! to the tracker always match what is on screen.

use menu_core::{Category, MenuItem, MenuSection, RestaurantInfo, SectionLayout};

#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    Title(&'a RestaurantInfo),
    Tagline(&'a RestaurantInfo),
    Blank,
    SectionHeader(&'a Category, usize),
    Rule,
    Headline(&'a MenuItem),
    Description(&'a MenuItem),
    NoResults,
    NoResultsHint,
}

pub struct Document<'a> {
    pub rows: Vec<Row<'a>>,
    pub layouts: Vec<SectionLayout>,
}

impl<'a> Document<'a> {
    pub fn build(restaurant: &'a RestaurantInfo, sections: &[MenuSection<'a>]) -> Self {
        let mut rows = vec![
            Row::Blank,
            Row::Title(restaurant),
            Row::Tagline(restaurant),
            Row::Blank,
        ];
        let mut layouts = Vec::with_capacity(sections.len());

        if sections.is_empty() {
            rows.extend([Row::Blank, Row::NoResults, Row::NoResultsHint]);
        }

        for section in sections {
            let top = rows.len();
            rows.push(Row::SectionHeader(section.category, section.items.len()));
            rows.push(Row::Rule);
            for item in &section.items {
                rows.push(Row::Headline(item));
                rows.push(Row::Description(item));
                rows.push(Row::Blank);
            }
            rows.push(Row::Blank);
            layouts.push(SectionLayout::new(
                section.category.id.as_str(),
                top as f64,
                (rows.len() - top) as f64,
            ));
        }

        Self { rows, layouts }
    }

    pub fn height(&self) -> f64 {
        self.rows.len() as f64
    }
}
