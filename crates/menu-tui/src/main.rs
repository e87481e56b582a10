mod app;
mod document;
mod event;
mod scroll;
mod theme;
mod ui;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use app::App;
use clap::{Parser, Subcommand};
use menu_core::{group_sections, telemetry, Catalog, CatalogFilter, FilterPredicate, Settings};
use ratatui::DefaultTerminal;
use tracing::info;

#[derive(Parser)]
#[command(name = "menu-tui")]
#[command(about = "Digital menu for Saffron & Spice")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Extra configuration file, layered over config/menu.toml
    #[arg(short, long, env = "MENU_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog file; the built-in menu is used when absent
    #[arg(long, env = "MENU_CATALOG")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu - Default
    Browse,
    /// Print the (filtered) menu grouped by category
    List {
        /// Case-insensitive search over dish names and descriptions
        #[arg(short, long, default_value = "")]
        query: String,

        /// all | veg | nonveg | bestseller
        #[arg(short, long, default_value = "all")]
        filter: FilterPredicate,
    },
    /// Validate the catalog and report problems
    Check,
}

fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if let Err(e) = telemetry::init_logger(&settings.logging) {
        eprintln!("Logging disabled: {}", e);
    }

    let catalog = load_catalog(cli.catalog.or_else(|| settings.catalog.path.clone()))?;

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => start_tui(catalog, &settings)?,
        Commands::List { query, filter } => handle_list(&catalog, &query, filter),
        Commands::Check => handle_check(&catalog)?,
    }

    Ok(())
}

/// Loading validates the catalog; orphaned dishes are logged there.
fn load_catalog(path: Option<PathBuf>) -> anyhow::Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(&path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => Catalog::reference().context("built-in catalog is invalid"),
    }
}

fn handle_list(catalog: &Catalog, query: &str, filter: FilterPredicate) {
    let result = CatalogFilter::apply(&catalog.items, query, filter);
    let sections = group_sections(catalog, &result);

    println!("{} - {}", catalog.restaurant.name, catalog.restaurant.tagline);
    if sections.is_empty() {
        println!("\nNo dishes found.");
        return;
    }

    for section in &sections {
        println!("\n{} {} ({})", section.category.icon, section.category.name, section.items.len());
        for item in &section.items {
            let mut badges = Vec::new();
            badges.push(if item.is_veg { "veg" } else { "non-veg" });
            if item.is_best_seller {
                badges.push("bestseller");
            }
            if item.is_chefs_pick {
                badges.push("chef's pick");
            }
            if item.is_spicy {
                badges.push("spicy");
            }
            println!("  {:<36} {:>7}  [{}]", item.name, item.formatted_price(), badges.join(", "));
        }
    }
}

fn handle_check(catalog: &Catalog) -> anyhow::Result<()> {
    let report = catalog.validate()?;
    println!(
        "{} categories, {} dishes",
        catalog.categories.len(),
        catalog.items.len()
    );

    if report.is_clean() {
        println!("Catalog OK.");
        return Ok(());
    }
    for (item, category) in &report.orphaned_items {
        println!("orphaned dish: {} (category '{}' does not exist)", item, category);
    }
    for category in &report.empty_categories {
        println!("empty category: {}", category);
    }
    Ok(())
}

fn start_tui(catalog: Catalog, settings: &Settings) -> anyhow::Result<()> {
    // Initialize terminal (ratatui::init handles raw mode + alternate screen)
    let terminal = ratatui::init();

    let result = run_app(terminal, catalog, settings);

    // Restore terminal (always, even on error)
    ratatui::restore();

    result
}

fn run_app(mut terminal: DefaultTerminal, catalog: Catalog, settings: &Settings) -> anyhow::Result<()> {
    let mut app = App::new(catalog, settings);
    info!(sections = app.tracker.sections().len(), "Menu opened");

    loop {
        app.on_frame(Instant::now());

        terminal.draw(|frame| {
            app.set_viewport_height(ui::body_height(frame.area()));
            ui::render(frame, &app);
        })?;

        if app.should_quit {
            break;
        }

        // Poll faster while a navigation scroll is animating
        let timeout = if app.scroll.is_animating() {
            settings.ui.tick().min(Duration::from_millis(16))
        } else {
            settings.ui.tick()
        };
        if let Some(evt) = event::poll_event(timeout)? {
            event::handle_event(&mut app, evt, Instant::now());
        }
    }

    Ok(())
}
