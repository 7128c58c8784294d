//! Axis tick computation: day-offset / date ticks on X, fixed-step count ticks on Y.

use super::types::Ticks;
use crate::models::{DateAxis, DayWindow};

/// Sentinel running maximum before any country contributed a value.
pub const NO_VALUE: i64 = -1;

/// Every `nth_tick`-th offset of `window`, starting at `window.start`.
///
/// Labels are the offsets themselves when `plot_days_as_label` is set,
/// otherwise ISO dates (`first_date + offset` days, see [`DateAxis::date_at`]).
/// `nth_tick == 0` behaves as 1.
pub fn compute_x_ticks(
    window: DayWindow,
    nth_tick: usize,
    plot_days_as_label: bool,
    dates: &DateAxis,
) -> Ticks<usize> {
    let positions: Vec<usize> = window.offsets().step_by(nth_tick.max(1)).collect();
    let labels = positions
        .iter()
        .map(|&d| {
            if plot_days_as_label {
                d.to_string()
            } else {
                dates
                    .date_at(d)
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| d.to_string())
            }
        })
        .collect();
    Ticks { positions, labels }
}

/// `floor(max_value / step) + 2` ticks at multiples of `step`, starting at 0.
///
/// With the [`NO_VALUE`] sentinel this yields the single tick `[0]`.
/// Non-positive steps behave as 1.
pub fn compute_y_ticks(max_value: i64, step: i64) -> Ticks<i64> {
    let step = step.max(1);
    let tick_count = (max_value.div_euclid(step) + 2).max(1);
    let positions: Vec<i64> = (0..tick_count).map(|t| t * step).collect();
    let labels = positions.iter().map(|p| p.to_string()).collect();
    Ticks { positions, labels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn axis() -> DateAxis {
        DateAxis::consecutive(NaiveDate::from_ymd_opt(2020, 1, 22).unwrap(), 100)
    }

    #[test]
    fn y_ticks_cover_the_maximum() {
        let t = compute_y_ticks(123_456, 50_000);
        assert_eq!(t.positions, vec![0, 50_000, 100_000, 150_000]);
        assert_eq!(t.labels, vec!["0", "50000", "100000", "150000"]);
    }

    #[test]
    fn y_ticks_without_values_are_a_single_zero() {
        let t = compute_y_ticks(NO_VALUE, 50_000);
        assert_eq!(t.positions, vec![0]);
        assert_eq!(t.labels, vec!["0"]);
    }

    #[test]
    fn y_ticks_on_exact_multiple_add_one_step_of_headroom() {
        assert_eq!(compute_y_ticks(10_000, 5_000).positions, vec![0, 5_000, 10_000, 15_000]);
        assert_eq!(compute_y_ticks(0, 5_000).positions, vec![0, 5_000]);
    }

    #[test]
    fn x_ticks_step_from_window_start() {
        let t = compute_x_ticks(DayWindow { start: 60, end: 70 }, 3, true, &axis());
        assert_eq!(t.positions, vec![60, 63, 66, 69]);
        assert_eq!(t.labels, vec!["60", "63", "66", "69"]);
    }

    #[test]
    fn x_ticks_as_dates() {
        let t = compute_x_ticks(DayWindow { start: 0, end: 12 }, 5, false, &axis());
        assert_eq!(t.positions, vec![0, 5, 10]);
        assert_eq!(t.labels, vec!["2020-01-22", "2020-01-27", "2020-02-01"]);
    }

    #[test]
    fn zero_nth_tick_keeps_every_day() {
        let t = compute_x_ticks(DayWindow { start: 2, end: 5 }, 0, true, &axis());
        assert_eq!(t.positions, vec![2, 3, 4]);
    }
}
