//! Season calendar
//!
//! A small static table of named date ranges per destination with
//! date-in-range and days-until-start queries. Windows may wrap the year
//! boundary; the set is tens of entries, so lookups are linear scans over
//! a sorted list.

use chrono::{Datelike, NaiveDate};

use shared::{validate_month_day, SeasonWindow};

/// Static season calendar for all destinations
#[derive(Debug, Clone, Default)]
pub struct SeasonCalendar {
    windows: Vec<SeasonWindow>,
}

impl SeasonCalendar {
    pub fn new(windows: Vec<SeasonWindow>) -> Self {
        let mut windows: Vec<SeasonWindow> = windows
            .into_iter()
            .filter(|w| {
                let valid = validate_month_day(w.start_month, w.start_day).is_ok()
                    && validate_month_day(w.end_month, w.end_day).is_ok();
                if !valid {
                    tracing::warn!(
                        destination_id = %w.destination_id,
                        label = %w.label,
                        "Season window has an invalid date, skipping"
                    );
                }
                valid
            })
            .collect();
        windows.sort_by(|a, b| {
            a.destination_id
                .cmp(&b.destination_id)
                .then(a.start_month.cmp(&b.start_month))
                .then(a.start_day.cmp(&b.start_day))
        });
        Self { windows }
    }

    /// Whether a (month, day) date falls inside a window, honoring
    /// year-boundary wrap (start > end spans Dec -> Jan).
    pub fn is_date_in_window(window: &SeasonWindow, month: u32, day: u32) -> bool {
        let date = (month, day);
        let start = (window.start_month, window.start_day);
        let end = (window.end_month, window.end_day);

        if window.wraps_year() {
            date >= start || date <= end
        } else {
            date >= start && date <= end
        }
    }

    /// Whether any day of a month falls inside a window
    pub fn window_covers_month(window: &SeasonWindow, month: u32) -> bool {
        if window.wraps_year() {
            month >= window.start_month || month <= window.end_month
        } else {
            (window.start_month..=window.end_month).contains(&month)
        }
    }

    /// First window covering the month for a destination, if any
    pub fn window_covering_month(
        &self,
        destination_id: &str,
        month: u32,
    ) -> Option<&SeasonWindow> {
        self.windows
            .iter()
            .find(|w| w.destination_id == destination_id && Self::window_covers_month(w, month))
    }

    /// Days until the window next starts: 0 while the date is inside the
    /// window, otherwise days to the next occurrence of the start date.
    pub fn days_until_start(window: &SeasonWindow, from: NaiveDate) -> i64 {
        if Self::is_date_in_window(window, from.month(), from.day()) {
            return 0;
        }

        for year in [from.year(), from.year() + 1] {
            let start = date_or_month_end(year, window.start_month, window.start_day);
            if start >= from {
                return (start - from).num_days();
            }
        }
        // Unreachable for valid (month, day) pairs
        0
    }

    /// The destination window that starts soonest, with its day distance
    pub fn next_window(
        &self,
        destination_id: &str,
        from: NaiveDate,
    ) -> Option<(&SeasonWindow, i64)> {
        self.windows
            .iter()
            .filter(|w| w.destination_id == destination_id)
            .map(|w| (w, Self::days_until_start(w, from)))
            .min_by_key(|(_, days)| *days)
    }

    /// Concrete dates for the window occurrence active at or next after
    /// `from`.
    pub fn occurrence_dates(window: &SeasonWindow, from: NaiveDate) -> (NaiveDate, NaiveDate) {
        let days_until = Self::days_until_start(window, from);
        let start = if days_until == 0 {
            // Inside the window: the occurrence started this year or late
            // last year when wrapping.
            let candidate = date_or_month_end(from.year(), window.start_month, window.start_day);
            if candidate <= from {
                candidate
            } else {
                date_or_month_end(from.year() - 1, window.start_month, window.start_day)
            }
        } else {
            from + chrono::Duration::days(days_until)
        };

        let mut end = date_or_month_end(start.year(), window.end_month, window.end_day);
        if end < start {
            end = date_or_month_end(start.year() + 1, window.end_month, window.end_day);
        }
        (start, end)
    }
}

/// Resolve (year, month, day) to a date, clamping Feb 29 in non-leap years
/// to the end of the month.
fn date_or_month_end(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 28))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whale_window() -> SeasonWindow {
        SeasonWindow::new("honolulu", "Whale season", "ホエールシーズン", (11, 1), (2, 28))
    }

    #[test]
    fn test_wrap_around_window_contains_winter_dates() {
        let window = whale_window();
        assert!(SeasonCalendar::is_date_in_window(&window, 12, 25));
        assert!(SeasonCalendar::is_date_in_window(&window, 1, 15));
        assert!(!SeasonCalendar::is_date_in_window(&window, 6, 1));
    }

    #[test]
    fn test_plain_window_bounds_inclusive() {
        let window = SeasonWindow::new("seoul", "Cherry blossoms", "桜", (4, 1), (4, 15));
        assert!(SeasonCalendar::is_date_in_window(&window, 4, 1));
        assert!(SeasonCalendar::is_date_in_window(&window, 4, 15));
        assert!(!SeasonCalendar::is_date_in_window(&window, 4, 16));
        assert!(!SeasonCalendar::is_date_in_window(&window, 3, 31));
    }

    #[test]
    fn test_days_until_start_inside_window_is_zero() {
        let window = whale_window();
        let from = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        assert_eq!(SeasonCalendar::days_until_start(&window, from), 0);
    }

    #[test]
    fn test_days_until_start_counts_forward() {
        let window = SeasonWindow::new("seoul", "Cherry blossoms", "桜", (4, 1), (4, 15));
        let from = NaiveDate::from_ymd_opt(2026, 3, 22).unwrap();
        assert_eq!(SeasonCalendar::days_until_start(&window, from), 10);

        // After the window closed, count to next year's start
        let after = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(SeasonCalendar::days_until_start(&window, after), 335);
    }

    #[test]
    fn test_window_covers_month_wrapping() {
        let window = whale_window();
        assert!(SeasonCalendar::window_covers_month(&window, 11));
        assert!(SeasonCalendar::window_covers_month(&window, 12));
        assert!(SeasonCalendar::window_covers_month(&window, 1));
        assert!(SeasonCalendar::window_covers_month(&window, 2));
        assert!(!SeasonCalendar::window_covers_month(&window, 7));
    }

    #[test]
    fn test_occurrence_dates_wrap() {
        let window = whale_window();
        let from = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let (start, end) = SeasonCalendar::occurrence_dates(&window, from);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn test_next_window_picks_soonest() {
        let calendar = SeasonCalendar::new(vec![
            SeasonWindow::new("paris", "Christmas markets", "クリスマスマーケット", (11, 20), (12, 26)),
            SeasonWindow::new("paris", "Rose gardens", "バラの見頃", (5, 15), (6, 30)),
        ]);

        let from = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let (window, days) = calendar.next_window("paris", from).unwrap();
        assert_eq!(window.label, "Rose gardens");
        assert_eq!(days, 14);
    }
}
