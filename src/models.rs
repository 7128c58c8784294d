use crate::error::ChartError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::PathBuf;

/// The two cumulative count series a chart can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Infections,
    Deaths,
}

impl Metric {
    /// Lower-case name used in plot names, e.g. `infections`.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Infections => "infections",
            Metric::Deaths => "deaths",
        }
    }

    /// Capitalized name used in filenames and legend labels, e.g. `Infections`.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Infections => "Infections",
            Metric::Deaths => "Deaths",
        }
    }
}

/// Country → cumulative counts, one value per day offset.
///
/// Every series in a table has the same length; [`DailySeriesTable::insert`]
/// rejects series that disagree with the first one inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeriesTable {
    series: BTreeMap<String, Vec<i64>>,
    len: usize,
}

impl DailySeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(country, values)` rows.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = (S, Vec<i64>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (country, values) in rows {
            table.insert(country, values)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, country: impl Into<String>, values: Vec<i64>) -> Result<(), ChartError> {
        let country = country.into();
        if self.series.is_empty() {
            self.len = values.len();
        } else if values.len() != self.len {
            return Err(ChartError::Dataset(format!(
                "series for {country:?} has {} values, expected {}",
                values.len(),
                self.len
            )));
        }
        if self.series.contains_key(&country) {
            return Err(ChartError::Dataset(format!("duplicate country {country:?}")));
        }
        self.series.insert(country, values);
        Ok(())
    }

    pub fn get(&self, country: &str) -> Option<&[i64]> {
        self.series.get(country).map(Vec::as_slice)
    }

    /// Countries in lexical order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Shared length of every series (0 for an empty table).
    pub fn series_len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Calendar dates aligned 1:1 with day offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateAxis {
    dates: Vec<NaiveDate>,
}

impl DateAxis {
    /// Validate a non-empty list of consecutive calendar days.
    ///
    /// Offset `i` must be `first_date + i` days, so gaps and reordering are rejected.
    pub fn new(dates: Vec<NaiveDate>) -> Result<Self, ChartError> {
        if dates.is_empty() {
            return Err(ChartError::Dataset("date axis is empty".into()));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0].succ_opt() != Some(w[1])) {
            return Err(ChartError::Dataset(format!(
                "dates are not consecutive days: {} followed by {}",
                w[0], w[1]
            )));
        }
        Ok(Self { dates })
    }

    /// `len` consecutive days starting at `first`.
    pub fn consecutive(first: NaiveDate, len: usize) -> Self {
        let dates = first.iter_days().take(len.max(1)).collect();
        Self { dates }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// `first_date + offset` days, the calendar date a day offset stands for.
    ///
    /// Also defined past the end of the axis.
    pub fn date_at(&self, offset: usize) -> Option<NaiveDate> {
        self.first_date().checked_add_days(Days::new(offset as u64))
    }
}

/// Infection and death tables sharing one date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub infections: DailySeriesTable,
    pub deaths: DailySeriesTable,
    pub dates: DateAxis,
}

impl Dataset {
    pub fn new(
        infections: DailySeriesTable,
        deaths: DailySeriesTable,
        dates: DateAxis,
    ) -> Result<Self, ChartError> {
        for (metric, table) in [(Metric::Infections, &infections), (Metric::Deaths, &deaths)] {
            if !table.is_empty() && table.series_len() != dates.len() {
                return Err(ChartError::Dataset(format!(
                    "{} series have {} days but the date axis has {}",
                    metric.name(),
                    table.series_len(),
                    dates.len()
                )));
            }
        }
        Ok(Self {
            infections,
            deaths,
            dates,
        })
    }

    pub fn table(&self, metric: Metric) -> &DailySeriesTable {
        match metric {
            Metric::Infections => &self.infections,
            Metric::Deaths => &self.deaths,
        }
    }
}

/// Resolved `[start, end)` range of day offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: usize,
    pub end: usize,
}

impl DayWindow {
    pub fn offsets(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configured window bounds; non-positive or out-of-range values are sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWindow {
    pub start: i64,
    pub end: i64,
}

/// Which chart variants are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricFlags {
    pub infections: bool,
    pub deaths: bool,
}

impl Default for MetricFlags {
    fn default() -> Self {
        Self {
            infections: true,
            deaths: true,
        }
    }
}

impl MetricFlags {
    pub fn enabled(&self, metric: Metric) -> bool {
        match metric {
            Metric::Infections => self.infections,
            Metric::Deaths => self.deaths,
        }
    }
}

/// Y tick step per metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YTickSteps {
    pub infections: i64,
    pub deaths: i64,
}

impl Default for YTickSteps {
    fn default() -> Self {
        Self {
            infections: 50_000,
            deaths: 5_000,
        }
    }
}

impl YTickSteps {
    pub fn for_metric(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Infections => self.infections,
            Metric::Deaths => self.deaths,
        }
    }
}

/// Everything one chart composition needs besides the data and figure settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub metrics: MetricFlags,
    pub window_raw: RawWindow,
    pub nth_tick: usize,
    pub y_tick_steps: YTickSteps,
    pub plot_days_as_label: bool,
    /// Draw dashed deaths lines on the infections chart (also requires `metrics.deaths`).
    pub overlay_deaths: bool,
    pub countries: Vec<String>,
}

/// Outcome of composing one chart variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RenderResult {
    /// The variant is disabled in the configuration.
    Skipped,
    Rendered {
        /// `None` when saving to file is disabled.
        file_path: Option<PathBuf>,
        plot_name: String,
        /// Requested countries absent from the dataset, in request order.
        missing_countries: Vec<String>,
    },
}

impl RenderResult {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RenderResult::Skipped)
    }

    pub fn plot_name(&self) -> Option<&str> {
        match self {
            RenderResult::Skipped => None,
            RenderResult::Rendered { plot_name, .. } => Some(plot_name),
        }
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            RenderResult::Skipped => None,
            RenderResult::Rendered { file_path, .. } => file_path.as_ref(),
        }
    }
}
