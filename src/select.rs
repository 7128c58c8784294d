//! Per-country series selection.

use crate::models::{DailySeriesTable, DayWindow};

/// Values of one country restricted to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSlice<'a> {
    /// First day offset of `values`.
    pub start: usize,
    pub values: &'a [i64],
    /// `None` when the slice is empty.
    pub max: Option<i64>,
}

impl<'a> SeriesSlice<'a> {
    /// `(day offset, value)` pairs in order.
    pub fn points(&self) -> impl Iterator<Item = (usize, i64)> + 'a {
        let start = self.start;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (start + i, *v))
    }
}

/// Result of looking a country up in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    Found(SeriesSlice<'a>),
    NotFound,
}

/// Select `country`'s values within `window`.
///
/// The window is clamped to the series so a window resolved against a longer
/// axis never panics.
pub fn select<'a>(table: &'a DailySeriesTable, country: &str, window: DayWindow) -> Selection<'a> {
    let Some(series) = table.get(country) else {
        return Selection::NotFound;
    };
    let end = window.end.min(series.len());
    let start = window.start.min(end);
    let values = &series[start..end];
    Selection::Found(SeriesSlice {
        start,
        values,
        max: values.iter().copied().max(),
    })
}

/// Fold a slice maximum into a running maximum; empty slices leave it untouched.
pub fn update_max(running: i64, slice_max: Option<i64>) -> i64 {
    match slice_max {
        Some(m) if m > running => m,
        _ => running,
    }
}
