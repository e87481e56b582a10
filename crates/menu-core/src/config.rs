//! Configuration management
//!
//! Sources, lowest priority first: built-in defaults, `config/menu.{toml,..}`,
//! an explicit file, then `MENU__*` environment variables
//! (e.g. `MENU__TRACKER__GRACE_WINDOW_MS=1500`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::viewport::VisibilityBand;

/// Visibility ratios above this are never reachable for tall sections.
pub const MAX_VISIBLE_RATIO: f64 = 0.5;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    pub tracker: TrackerSettings,
    pub navigation: NavigationSettings,
    pub ui: UiSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrackerSettings {
    pub grace_window_ms: u64,
    pub band_top: f64,
    pub band_bottom: f64,
    pub min_visible_ratio: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NavigationSettings {
    /// Distance kept above a section when scrolling to it.
    pub scroll_offset: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UiSettings {
    pub tick_ms: u64,
    /// Ease-out speed: `offset += (target - offset) * speed * dt`
    pub scroll_speed: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CatalogSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_level() -> String {
    "info,menu_core=debug,menu_tui=debug".to_string()
}

impl TrackerSettings {
    pub fn grace_window(&self) -> Duration {
        Duration::from_millis(self.grace_window_ms)
    }

    pub fn band(&self) -> VisibilityBand {
        VisibilityBand {
            top: self.band_top,
            bottom: self.band_bottom,
            min_visible_ratio: self.min_visible_ratio,
        }
    }
}

impl UiSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracker: TrackerSettings {
                grace_window_ms: 1000,
                band_top: 0.10,
                band_bottom: 0.80,
                min_visible_ratio: 0.10,
            },
            navigation: NavigationSettings { scroll_offset: 2.0 },
            ui: UiSettings {
                tick_ms: 100,
                scroll_speed: 8.0,
            },
            catalog: CatalogSettings::default(),
            logging: LoggingSettings {
                directory: PathBuf::from("logs"),
                format: default_log_format(),
                level: default_log_level(),
            },
        }
    }
}

impl Settings {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .set_default("tracker.grace_window_ms", 1000)?
            .set_default("tracker.band_top", 0.10)?
            .set_default("tracker.band_bottom", 0.80)?
            .set_default("tracker.min_visible_ratio", 0.10)?
            .set_default("navigation.scroll_offset", 2.0)?
            .set_default("ui.tick_ms", 100)?
            .set_default("ui.scroll_speed", 8.0)?
            .set_default("logging.directory", "logs")?
            .set_default("logging.format", "pretty")?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name("config/menu").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("MENU")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        settings.sanitize();
        Ok(settings)
    }

    /// Clamp out-of-range values instead of failing.
    pub fn sanitize(&mut self) {
        let t = &mut self.tracker;
        if !(0.0..=MAX_VISIBLE_RATIO).contains(&t.min_visible_ratio) {
            let clamped = t.min_visible_ratio.clamp(0.0, MAX_VISIBLE_RATIO);
            warn!(
                "tracker.min_visible_ratio={} out of range, using {}",
                t.min_visible_ratio, clamped
            );
            t.min_visible_ratio = clamped;
        }
        if !(0.0..1.0).contains(&t.band_top) {
            warn!("tracker.band_top={} out of range, using 0.10", t.band_top);
            t.band_top = 0.10;
        }
        if !(0.0..1.0).contains(&t.band_bottom) || t.band_top + t.band_bottom >= 1.0 {
            warn!(
                "tracker.band_bottom={} leaves no visible band, using 0.80",
                t.band_bottom
            );
            t.band_bottom = 0.80;
            if t.band_top + t.band_bottom >= 1.0 {
                t.band_top = 0.10;
            }
        }
        if self.ui.tick_ms == 0 {
            warn!("ui.tick_ms=0, using 100");
            self.ui.tick_ms = 100;
        }
        if self.navigation.scroll_offset < 0.0 {
            self.navigation.scroll_offset = 0.0;
        }
    }
}
