//! Day window resolution.
//!
//! Configured bounds are permissive: anything out of range or non-positive
//! falls back to the full series (end) or day zero (start) instead of erroring.

use crate::models::{DayWindow, RawWindow};

/// Resolve configured start/end offsets against a series of `series_length` days.
///
/// - `end` is kept when `0 < raw_end < series_length`, otherwise it is `series_length`.
/// - `start` is kept when `0 < raw_start < end`, otherwise it is `0`.
pub fn resolve(raw_start: i64, raw_end: i64, series_length: usize) -> DayWindow {
    let len = series_length as i64;
    let end = if raw_end > 0 && raw_end < len {
        raw_end as usize
    } else {
        series_length
    };
    let start = if raw_start > 0 && raw_start < end as i64 {
        raw_start as usize
    } else {
        0
    };
    DayWindow { start, end }
}

/// Convenience wrapper over [`resolve`] for a [`RawWindow`].
pub fn resolve_raw(raw: RawWindow, series_length: usize) -> DayWindow {
    resolve(raw.start, raw.end, series_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(start: usize, end: usize) -> DayWindow {
        DayWindow { start, end }
    }

    #[test]
    fn open_end_uses_full_length() {
        assert_eq!(resolve(60, -1, 100), w(60, 100));
        assert_eq!(resolve(60, 0, 100), w(60, 100));
    }

    #[test]
    fn start_beyond_length_falls_back_to_zero() {
        assert_eq!(resolve(150, -1, 100), w(0, 100));
    }

    #[test]
    fn start_not_before_end_falls_back_to_zero() {
        assert_eq!(resolve(60, 50, 100), w(0, 50));
        assert_eq!(resolve(50, 50, 100), w(0, 50));
    }

    #[test]
    fn negative_start_is_zero() {
        assert_eq!(resolve(-5, -1, 100), w(0, 100));
    }

    #[test]
    fn end_equal_to_length_is_not_kept_but_resolves_the_same() {
        assert_eq!(resolve(10, 100, 100), w(10, 100));
        assert_eq!(resolve(10, 250, 100), w(10, 100));
    }

    #[test]
    fn in_range_bounds_are_kept() {
        assert_eq!(resolve(5, 20, 100), w(5, 20));
        assert_eq!(resolve_raw(RawWindow { start: 5, end: 20 }, 100), w(5, 20));
    }
}
