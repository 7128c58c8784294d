//! covid_charts
//!
//! Per-country comparison charts of cumulative COVID-19 infections and deaths,
//! drawn from an already consolidated daily-counts table. Pairs with the
//! `covid-charts` CLI.
//!
//! ### Features
//! - Permissive day windows (`start_day = 60`, `end_day = -1` → day 60 to the end)
//! - Infections chart with dashed deaths overlay, and a deaths-only chart
//! - Countries missing from the data are skipped and reported, not fatal
//! - Exact tick control: every n-th day on X, fixed per-metric steps on Y
//! - SVG or PNG output under `<image_dir>/<last date>/`
//!
//! ### Example
//! ```no_run
//! use covid_charts::{ChartComposer, ChartKind, Config, PlottersBackend};
//!
//! let cfg = Config::default();
//! let data = covid_charts::storage::load_dataset("confirmed.csv", "deaths.csv")?;
//! let backend = PlottersBackend::new(cfg.plot.format, cfg.plot.font_path.clone());
//! let composer = ChartComposer::new(&cfg, backend, std::env::current_dir()?);
//! let result = composer.compose(ChartKind::InfectionsOverlay, &data)?;
//! println!("{:?}", result);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod select;
pub mod storage;
pub mod viz;
pub mod window;

pub use config::Config;
pub use error::ChartError;
pub use models::{DailySeriesTable, Dataset, DateAxis, DayWindow, Metric, PlotRequest, RenderResult};
pub use viz::{ChartComposer, ChartKind, PlottersBackend};
