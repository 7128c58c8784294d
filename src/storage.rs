//! Reading consolidated daily-count tables and laying out chart files on disk.
//!
//! The expected CSV is the wide layout of the consolidated dataset: the first
//! column holds the country, every further column one day.
//!
//! ```text
//! Country/Region,1/22/20,1/23/20,1/24/20
//! Germany,0,0,0
//! Italy,0,0,2
//! ```

use crate::models::{DailySeriesTable, Dataset, DateAxis};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a header date: `m/d/yy` as in the consolidated source, or ISO `YYYY-MM-DD`.
pub fn parse_header_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%y"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn parse_count(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(0);
    }
    cell.parse::<i64>()
        .ok()
        .or_else(|| cell.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.round() as i64))
}

/// Read one wide table from any reader.
pub fn read_daily_csv<R: Read>(rdr: R) -> Result<(DailySeriesTable, DateAxis)> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let headers = rdr.headers().context("reading CSV header")?.clone();
    if headers.len() < 2 {
        bail!("expected a country column followed by at least one date column");
    }
    let dates = headers
        .iter()
        .skip(1)
        .map(|h| parse_header_date(h).ok_or_else(|| anyhow!("unrecognized date column {h:?}")))
        .collect::<Result<Vec<_>>>()?;
    let axis = DateAxis::new(dates)?;

    let mut table = DailySeriesTable::new();
    for (row_idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading CSV row {}", row_idx + 2))?;
        let country = record.get(0).unwrap_or_default().to_string();
        if country.is_empty() {
            bail!("row {} has no country", row_idx + 2);
        }
        let values = record
            .iter()
            .skip(1)
            .map(|cell| {
                parse_count(cell)
                    .ok_or_else(|| anyhow!("row {} ({country}): bad count {cell:?}", row_idx + 2))
            })
            .collect::<Result<Vec<_>>>()?;
        if values.len() != axis.len() {
            bail!(
                "row {} ({country}) has {} values, header has {} dates",
                row_idx + 2,
                values.len(),
                axis.len()
            );
        }
        table.insert(country, values)?;
    }
    Ok((table, axis))
}

/// Read one wide table from a file.
pub fn load_daily_csv<P: AsRef<Path>>(path: P) -> Result<(DailySeriesTable, DateAxis)> {
    let path = path.as_ref();
    let f = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_daily_csv(f).with_context(|| format!("parsing {}", path.display()))
}

/// Load infections and deaths tables; both must share one date axis.
pub fn load_dataset<P: AsRef<Path>, Q: AsRef<Path>>(infections: P, deaths: Q) -> Result<Dataset> {
    let (infections, axis) = load_daily_csv(infections)?;
    let (deaths, deaths_axis) = load_daily_csv(deaths)?;
    if axis != deaths_axis {
        bail!(
            "date axes differ: infections {}..{} ({} days), deaths {}..{} ({} days)",
            axis.first_date(),
            axis.last_date(),
            axis.len(),
            deaths_axis.first_date(),
            deaths_axis.last_date(),
            deaths_axis.len()
        );
    }
    Ok(Dataset::new(infections, deaths, axis)?)
}

/// `<cwd>/<image_dir>/<last_date>/<filename>.<ext>`, creating the directories.
///
/// Path separators in `filename` are replaced so a country name can't escape the directory.
pub fn plot_path(
    cwd: &Path,
    image_dir: &Path,
    last_date: NaiveDate,
    filename: &str,
    ext: &str,
) -> std::io::Result<PathBuf> {
    let dir = cwd.join(image_dir).join(last_date.format("%Y-%m-%d").to_string());
    fs::create_dir_all(&dir)?;
    let safe: String = filename
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    Ok(dir.join(format!("{safe}.{ext}")))
}
