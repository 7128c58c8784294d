//! Drawing backends: turn a computed [`Chart`] into pixels and optionally a file.
//!
//! A [`Backend`] hands out one [`Canvas`] per composition. The canvas owns every
//! rendering resource of that chart and releases it when dropped, so callers
//! get cleanup on every return path, including failed saves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::debug;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use super::fonts::ensure_fonts_registered;
use super::legend::{draw_legend_panel, estimate_text_width_px};
use super::types::{Chart, FigureSize, ImageFormat, LineDash};
use crate::error::ChartError;
use crate::storage;

/// Where a rendered chart is persisted: `<cwd>/<image_dir>/<last_date>/<filename>.<ext>`.
#[derive(Debug, Clone, Copy)]
pub struct SaveTarget<'a> {
    pub cwd: &'a Path,
    pub image_dir: &'a Path,
    pub last_date: NaiveDate,
    pub filename: &'a str,
}

/// A figure for exactly one chart. Dropping it releases its resources.
pub trait Canvas {
    /// Draw the chart (replaces anything drawn before).
    fn render(&mut self, chart: &Chart) -> Result<(), ChartError>;

    /// Persist the last rendered chart and return the written path.
    fn save(&self, target: &SaveTarget<'_>) -> Result<PathBuf, ChartError>;
}

/// Factory for canvases.
pub trait Backend {
    type Canvas: Canvas;

    fn open(&self, size: FigureSize) -> Result<Self::Canvas, ChartError>;
}

/// Plotters-based backend: renders to an in-memory SVG, saves as SVG or PNG.
#[derive(Debug, Clone, Default)]
pub struct PlottersBackend {
    pub format: ImageFormat,
    pub font_path: Option<PathBuf>,
}

impl PlottersBackend {
    /// `font_path`, when it loads, becomes the process-wide "sans-serif" font
    /// on [`Backend::open`]; otherwise a system font is used.
    pub fn new(format: ImageFormat, font_path: Option<PathBuf>) -> Self {
        Self { format, font_path }
    }
}

impl Backend for PlottersBackend {
    type Canvas = PlottersCanvas;

    fn open(&self, size: FigureSize) -> Result<PlottersCanvas, ChartError> {
        if ensure_fonts_registered(self.font_path.as_deref()).is_none() {
            return Err(ChartError::Font(
                "no sans-serif TTF found; set `plot.font_path`".into(),
            ));
        }
        if size.width == 0 || size.height == 0 {
            return Err(ChartError::Render(format!(
                "figure size {}x{} has no area",
                size.width, size.height
            )));
        }
        debug!("opened {}x{} canvas", size.width, size.height);
        Ok(PlottersCanvas {
            size,
            format: self.format,
            svg: String::new(),
            chart: None,
        })
    }
}

/// Canvas produced by [`PlottersBackend`].
#[derive(Debug)]
pub struct PlottersCanvas {
    size: FigureSize,
    format: ImageFormat,
    svg: String,
    chart: Option<Chart>,
}

impl PlottersCanvas {
    /// SVG markup of the last render (empty before the first one).
    pub fn svg(&self) -> &str {
        &self.svg
    }
}

impl Canvas for PlottersCanvas {
    fn render(&mut self, chart: &Chart) -> Result<(), ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.size.width, self.size.height))
                .into_drawing_area();
            draw_chart(root, chart)?;
        }
        self.svg = svg;
        self.chart = Some(chart.clone());
        Ok(())
    }

    fn save(&self, target: &SaveTarget<'_>) -> Result<PathBuf, ChartError> {
        let Some(chart) = self.chart.as_ref() else {
            return Err(ChartError::Render("nothing rendered yet".into()));
        };
        let path = storage::plot_path(
            target.cwd,
            target.image_dir,
            target.last_date,
            target.filename,
            self.format.extension(),
        )
        .map_err(|source| ChartError::Persist {
            path: target.cwd.join(target.image_dir),
            source,
        })?;

        match self.format {
            ImageFormat::Svg => std::fs::write(&path, &self.svg).map_err(|source| {
                ChartError::Persist {
                    path: path.clone(),
                    source,
                }
            })?,
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, (self.size.width, self.size.height))
                    .into_drawing_area();
                draw_chart(root, chart).map_err(|e| ChartError::Persist {
                    path: path.clone(),
                    source: std::io::Error::other(e.to_string()),
                })?;
            }
        }
        Ok(path)
    }
}

impl Drop for PlottersCanvas {
    fn drop(&mut self) {
        debug!("released {}x{} canvas", self.size.width, self.size.height);
    }
}

/// Draws to any Plotters backend: plot area on the left, legend panel on the right.
fn draw_chart<DB>(root: DrawingArea<DB, Shift>, chart: &Chart) -> Result<(), ChartError>
where
    DB: DrawingBackend,
{
    const MARGIN: u32 = 16;
    const LABEL_PX: u32 = 12;

    root.fill(&WHITE).map_err(ChartError::render)?;
    let (plot_area, legend_area) = root.split_horizontally((82).percent_width());

    let x_start = chart.window.start as i64;
    let x_end = (chart.window.end as i64 - 1).max(x_start + 1);
    let y_top = chart
        .y_ticks
        .positions
        .last()
        .copied()
        .unwrap_or(0)
        .max(1);

    let x_labels: HashMap<i64, String> = chart
        .x_ticks
        .iter()
        .map(|(p, l)| (*p as i64, l.to_string()))
        .collect();
    let x_key_points: Vec<i64> = chart.x_ticks.positions.iter().map(|p| *p as i64).collect();

    // Left label area sized to the widest y label.
    let left_label_px = chart
        .y_ticks
        .labels
        .iter()
        .map(|l| estimate_text_width_px(l, LABEL_PX))
        .max()
        .unwrap_or(0)
        .saturating_add(18)
        .clamp(48, 140);

    let mut cc = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .caption(&chart.title, (FontFamily::SansSerif, 20))
        .set_label_area_size(LabelAreaPosition::Left, left_label_px + 20)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(
            (x_start..x_end).with_key_points(x_key_points),
            (0i64..y_top).with_key_points(chart.y_ticks.positions.clone()),
        )
        .map_err(ChartError::render)?;

    let x_fmt = |v: &i64| x_labels.get(v).cloned().unwrap_or_default();
    let y_fmt = |v: &i64| v.to_string();
    cc.configure_mesh()
        .x_desc(chart.label_x.as_str())
        .y_desc(chart.label_y.as_str())
        .x_labels(chart.x_ticks.len().max(1))
        .y_labels(chart.y_ticks.len().max(1))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style((FontFamily::SansSerif, LABEL_PX))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(ChartError::render)?;

    for line in &chart.lines {
        let points: Vec<(i64, i64)> = line.points.iter().map(|(x, y)| (*x as i64, *y)).collect();
        let style = line.color.stroke_width(2);
        match line.dash {
            LineDash::Solid => cc.draw_series(LineSeries::new(points, style)),
            LineDash::Dashed => cc.draw_series(DashedLineSeries::new(points, 8, 5, style)),
        }
        .map_err(ChartError::render)?;
    }

    draw_legend_panel(&legend_area, &chart.lines)?;

    plot_area.present().map_err(ChartError::render)?;
    legend_area.present().map_err(ChartError::render)?;
    Ok(())
}
