//! Chart composition: window, per-country series, ticks, then rendering.
//!
//! - One composer for both variants, driven by [`ChartKind`]
//! - Countries missing from the dataset are skipped and reported, never fatal
//! - Ticks are computed after every country, from the largest value drawn
//! - Rendering and saving go through a [`Backend`]; the canvas is released on every path

pub mod fonts;
pub mod legend;
pub mod palette;
pub mod render;
pub mod ticks;
pub mod types;

pub use palette::Palette;
pub use render::{Backend, Canvas, PlottersBackend, PlottersCanvas, SaveTarget};
pub use types::{Chart, ChartKind, ChartLine, FigureSize, ImageFormat, LineDash, Ticks};

use std::path::PathBuf;

use log::info;

use crate::config::Config;
use crate::error::ChartError;
use crate::models::{Dataset, PlotRequest, RenderResult};
use crate::select::{SeriesSlice, Selection, select, update_max};
use crate::window;
use ticks::{NO_VALUE, compute_x_ticks, compute_y_ticks};

/// A computed chart plus the requested countries that were not in the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub chart: Chart,
    pub missing_countries: Vec<String>,
}

/// Substitute `{metric}` and `{countries}` in a name template.
pub fn fill_template(template: &str, metric: &str, countries: &str) -> String {
    template
        .replace("{metric}", metric)
        .replace("{countries}", countries)
}

/// Composes the per-country comparison charts for one configuration.
pub struct ChartComposer<'a, B: Backend> {
    config: &'a Config,
    request: PlotRequest,
    backend: B,
    palette: fn(usize) -> Palette,
    cwd: PathBuf,
}

impl<'a, B: Backend> ChartComposer<'a, B> {
    /// `cwd` is the base directory files are saved under.
    pub fn new(config: &'a Config, backend: B, cwd: impl Into<PathBuf>) -> Self {
        Self {
            config,
            request: config.plot_request(),
            backend,
            palette: Palette::office,
            cwd: cwd.into(),
        }
    }

    /// Replace the default Office palette.
    pub fn with_palette(mut self, palette: fn(usize) -> Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn request(&self) -> &PlotRequest {
        &self.request
    }

    /// Human-readable chart name, e.g. `Specific countries (deaths): "Germany, Italy"`.
    pub fn plot_name(&self, kind: ChartKind) -> String {
        fill_template(
            &self.config.countries.plot_name,
            kind.metric().name(),
            &self.request.countries.join(", "),
        )
    }

    /// File stem, e.g. `specific-countries-Deaths-Germany-Italy`.
    pub fn filename(&self, kind: ChartKind) -> String {
        fill_template(
            &self.config.plot.filename,
            kind.metric().title(),
            &self.request.countries.join("-"),
        )
    }

    /// Compute the chart for `kind` without touching any backend.
    pub fn build_chart(&self, kind: ChartKind, dataset: &Dataset) -> Composition {
        let req = &self.request;
        let metric = kind.metric();

        let window = window::resolve_raw(req.window_raw, dataset.dates.len());
        info!("Plotting to days [{}, {}]", window.start, window.end);

        let palette = (self.palette)(req.countries.len());
        let overlay_deaths = req.overlay_deaths && req.metrics.deaths;

        let mut lines = Vec::new();
        let mut missing_countries = Vec::new();
        let mut highest = NO_VALUE;

        for (i, country) in req.countries.iter().enumerate() {
            let slice = match select(dataset.table(metric), country, window) {
                Selection::Found(slice) => slice,
                Selection::NotFound => {
                    info!("Could not find given country \"{country}\"");
                    missing_countries.push(country.clone());
                    continue;
                }
            };
            highest = update_max(highest, slice.max);
            let color = palette.color(i);

            match kind {
                ChartKind::InfectionsOverlay => {
                    lines.push(series_line(
                        format!("{country} (Infections)"),
                        color,
                        LineDash::Solid,
                        slice,
                    ));
                    if overlay_deaths {
                        match select(&dataset.deaths, country, window) {
                            Selection::Found(deaths) => lines.push(series_line(
                                format!("{country} (Deaths)"),
                                color,
                                LineDash::Dashed,
                                deaths,
                            )),
                            Selection::NotFound => {
                                info!("No deaths series for \"{country}\"");
                            }
                        }
                    }
                }
                ChartKind::DeathsOnly => {
                    lines.push(series_line(country.clone(), color, LineDash::Solid, slice));
                }
            }
        }

        let x_ticks = compute_x_ticks(
            window,
            req.nth_tick,
            req.plot_days_as_label,
            &dataset.dates,
        );
        let y_ticks = compute_y_ticks(highest, req.y_tick_steps.for_metric(metric));

        let plot = &self.config.plot;
        let chart = Chart {
            title: format!(
                "{} - {} - {}",
                plot.title,
                dataset.dates.last_date(),
                self.plot_name(kind)
            ),
            label_x: plot.label_x.clone(),
            label_y: plot.label_y.clone(),
            window,
            lines,
            x_ticks,
            y_ticks,
        };
        Composition {
            chart,
            missing_countries,
        }
    }

    /// Compose, render and (if configured) save one chart variant.
    ///
    /// Returns [`RenderResult::Skipped`] without doing any work when the
    /// variant is disabled. Save failures are returned after the canvas has
    /// been released.
    pub fn compose(&self, kind: ChartKind, dataset: &Dataset) -> Result<RenderResult, ChartError> {
        let plot_name = self.plot_name(kind);
        if !self.request.metrics.enabled(kind.metric()) {
            info!("Skipping plot \"{plot_name}\"");
            return Ok(RenderResult::Skipped);
        }
        info!("Plotting \"{plot_name}\"");

        let Composition {
            chart,
            missing_countries,
        } = self.build_chart(kind, dataset);

        let mut canvas = self.backend.open(self.config.plot.size())?;
        canvas.render(&chart)?;

        let file_path = if self.config.plot.save_to_file {
            let filename = self.filename(kind);
            let path = canvas.save(&SaveTarget {
                cwd: &self.cwd,
                image_dir: &self.config.plot.image_dir,
                last_date: dataset.dates.last_date(),
                filename: &filename,
            })?;
            info!("Saved plot \"{plot_name}\" to {}", path.display());
            Some(path)
        } else {
            None
        };
        drop(canvas);

        Ok(RenderResult::Rendered {
            file_path,
            plot_name,
            missing_countries,
        })
    }

    /// Compose every variant in order (infections overlay, then deaths).
    pub fn compose_all(
        &self,
        dataset: &Dataset,
    ) -> Result<Vec<(ChartKind, RenderResult)>, ChartError> {
        ChartKind::ALL
            .into_iter()
            .map(|kind| Ok((kind, self.compose(kind, dataset)?)))
            .collect()
    }
}

fn series_line(
    label: String,
    color: plotters::style::RGBColor,
    dash: LineDash,
    slice: SeriesSlice<'_>,
) -> ChartLine {
    ChartLine {
        label,
        color,
        dash,
        points: slice.points().collect(),
    }
}
