//! Layered settings.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config`)
//! 3. `CANDLEWICK_*` environment variables, e.g. `CANDLEWICK_PANEL_MAX_WIDTH=60`
//!
//! ```toml
//! panel_max_width = 90
//! history_cap = 40
//! summary_every = 20
//! refresh = "5s"
//! chart_height = 16
//! theme = "auto"      # auto | dark | light
//! color = "auto"      # auto | always | never
//! overflow = "spill"  # spill | clip
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;
use tracing::debug;

use crate::data::duration::parse_duration;
use crate::data::history::DEFAULT_HISTORY_CAP;
use crate::live::DEFAULT_SUMMARY_EVERY;
use crate::ui::panel::DEFAULT_MAX_WIDTH;
use crate::ui::{ColorMode, Overflow, Theme, ThemeChoice};

pub const ENV_PREFIX: &str = "CANDLEWICK";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Widest a panel gets, in columns.
    pub panel_max_width: usize,
    /// Points kept per symbol for watch sparklines.
    pub history_cap: usize,
    /// Trades between summary lines in `stream`; 0 turns them off.
    pub summary_every: u64,
    /// Redraw interval for `watch`, e.g. "500ms", "5s".
    pub refresh: String,
    /// Grid rows of a candlestick chart.
    pub chart_height: usize,
    pub theme: ThemeChoice,
    pub color: ColorMode,
    pub overflow: Overflow,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            panel_max_width: DEFAULT_MAX_WIDTH,
            history_cap: DEFAULT_HISTORY_CAP,
            summary_every: DEFAULT_SUMMARY_EVERY,
            refresh: "5s".to_string(),
            chart_height: 16,
            theme: ThemeChoice::Auto,
            color: ColorMode::Auto,
            overflow: Overflow::Spill,
        }
    }
}

impl Settings {
    /// Load from `path` (if given and present) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Like [`Settings::load`], reading variables from `env` instead of the
    /// process environment when it is `Some`.
    pub fn load_from(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "loading settings file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        let settings: Settings = builder
            .build()
            .context("failed to read settings")?
            .try_deserialize()
            .context("invalid settings")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.panel_max_width < 4 {
            bail!("panel_max_width must be at least 4, got {}", self.panel_max_width);
        }
        if self.chart_height == 0 {
            bail!("chart_height must be positive");
        }
        self.refresh_interval()?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.refresh).context("invalid refresh interval")
    }

    /// Theme for this process, honoring `color` and `NO_COLOR`.
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.theme, self.color)
    }
}
