//! Public types for the visualization module.

use crate::models::{DayWindow, Metric};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Chart variants supported by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Solid infections line per country, dashed deaths line in the same color.
    InfectionsOverlay,
    /// One solid deaths line per country.
    DeathsOnly,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::InfectionsOverlay, ChartKind::DeathsOnly];

    /// Metric that drives the enable flag, the y scale and the filename.
    pub fn metric(self) -> Metric {
        match self {
            ChartKind::InfectionsOverlay => Metric::Infections,
            ChartKind::DeathsOnly => Metric::Deaths,
        }
    }
}

/// Stroke pattern of a series line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    Dashed,
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

/// Figure size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

/// Axis positions paired with their display labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticks<T> {
    pub positions: Vec<T>,
    pub labels: Vec<String>,
}

impl<T> Ticks<T> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(position, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &str)> {
        self.positions
            .iter()
            .zip(self.labels.iter().map(String::as_str))
    }
}

/// One drawn series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub label: String,
    pub color: RGBColor,
    pub dash: LineDash,
    /// `(day offset, cumulative count)`.
    pub points: Vec<(usize, i64)>,
}

/// Fully computed, backend-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub label_x: String,
    pub label_y: String,
    pub window: DayWindow,
    /// Draw order; later lines are drawn on top.
    pub lines: Vec<ChartLine>,
    pub x_ticks: Ticks<usize>,
    pub y_ticks: Ticks<i64>,
}

impl Chart {
    /// Legend entries in draw order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.label.as_str()).collect()
    }
}
