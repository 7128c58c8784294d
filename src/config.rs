//! Chart configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. The values are immutable once loaded; each composition gets
//! a shared reference.
//!
//! ```toml
//! [plot]
//! title = "COVID-19"
//! save_to_file = true
//!
//! [plot.enabled]
//! deaths = false
//!
//! [countries]
//! countries = ["Germany", "Italy"]
//! start_day = 40
//! ```

use crate::models::{MetricFlags, PlotRequest, RawWindow, YTickSteps};
use crate::viz::types::{FigureSize, ImageFormat};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub plot: PlotSettings,
    pub countries: CountryChartSettings,
}

/// Figure-wide settings shared by every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotSettings {
    pub title: String,
    pub label_x: String,
    pub label_y: String,
    pub width: u32,
    pub height: u32,
    /// Output directory, relative to the working directory.
    pub image_dir: PathBuf,
    pub save_to_file: bool,
    /// Filename template without extension; `{metric}` and `{countries}` are substituted.
    pub filename: String,
    pub format: ImageFormat,
    /// TTF used for all chart text; system locations are searched when unset.
    pub font_path: Option<PathBuf>,
    pub enabled: MetricFlags,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            title: "COVID-19".into(),
            label_x: "Date".into(),
            label_y: "Cases".into(),
            width: 1600,
            height: 900,
            image_dir: PathBuf::from("plots"),
            save_to_file: true,
            filename: "specific-countries-{metric}-{countries}".into(),
            format: ImageFormat::Svg,
            font_path: None,
            enabled: MetricFlags::default(),
        }
    }
}

impl PlotSettings {
    pub fn size(&self) -> FigureSize {
        FigureSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Settings of the per-country comparison charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountryChartSettings {
    /// Plot name template; `{metric}` and `{countries}` are substituted.
    pub plot_name: String,
    /// First day offset; non-positive or out-of-range values mean day 0.
    pub start_day: i64,
    /// End day offset (exclusive); non-positive or out-of-range values mean the last day.
    pub end_day: i64,
    /// Label every n-th day on the x axis.
    pub nth_tick: usize,
    pub y_tick_steps: YTickSteps,
    /// Overlay dashed deaths lines on the infections chart.
    pub plot_deaths: bool,
    /// Label the x axis with day offsets instead of dates.
    pub plot_days_as_label_x: bool,
    pub countries: Vec<String>,
}

impl Default for CountryChartSettings {
    fn default() -> Self {
        Self {
            plot_name: "Specific countries ({metric}): \"{countries}\"".into(),
            start_day: 60,
            end_day: -1,
            nth_tick: 3,
            y_tick_steps: YTickSteps::default(),
            plot_deaths: true,
            plot_days_as_label_x: false,
            countries: [
                "Germany",
                "Spain",
                "Iran",
                "US",
                "France",
                "Korea, South",
                "Switzerland",
                "United Kingdom",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl Config {
    /// Parse TOML text and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s).context("parsing configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing configuration")
    }

    /// Reject settings that would make every chart meaningless.
    ///
    /// Window bounds are deliberately not checked; they resolve permissively.
    pub fn validate(&self) -> Result<()> {
        let c = &self.countries;
        if c.countries.is_empty() {
            bail!("`countries.countries` must name at least one country");
        }
        if c.nth_tick == 0 {
            bail!("`countries.nth_tick` must be at least 1");
        }
        if c.y_tick_steps.infections <= 0 || c.y_tick_steps.deaths <= 0 {
            bail!("`countries.y_tick_steps` must be positive");
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            bail!("`plot.width` and `plot.height` must be positive");
        }
        Ok(())
    }

    /// The immutable request the composer works from.
    pub fn plot_request(&self) -> PlotRequest {
        let c = &self.countries;
        PlotRequest {
            metrics: self.plot.enabled,
            window_raw: RawWindow {
                start: c.start_day,
                end: c.end_day,
            },
            nth_tick: c.nth_tick,
            y_tick_steps: c.y_tick_steps,
            plot_days_as_label: c.plot_days_as_label_x,
            overlay_deaths: c.plot_deaths,
            countries: c.countries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_default() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.countries.start_day, 60);
        assert_eq!(cfg.countries.end_day, -1);
        assert_eq!(cfg.countries.countries.len(), 8);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [plot.enabled]
            deaths = false

            [countries]
            countries = ["Germany", "Atlantis"]
            "#,
        )
        .unwrap();
        assert!(cfg.plot.enabled.infections);
        assert!(!cfg.plot.enabled.deaths);
        assert_eq!(cfg.countries.nth_tick, 3);
        let req = cfg.plot_request();
        assert_eq!(req.countries, vec!["Germany", "Atlantis"]);
        assert_eq!(req.window_raw, RawWindow { start: 60, end: -1 });
    }

    #[test]
    fn rejects_unusable_values() {
        assert!(Config::from_toml_str("[countries]\ncountries = []").is_err());
        assert!(Config::from_toml_str("[countries]\nnth_tick = 0").is_err());
        assert!(
            Config::from_toml_str("[countries.y_tick_steps]\ninfections = 0\ndeaths = 10").is_err()
        );
        assert!(Config::from_toml_str("[plot]\ntitel = \"typo\"").is_err());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = Config::default().to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), Config::default());
    }
}
