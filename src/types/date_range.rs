use chrono::{Datelike, NaiveDate};
use std::fmt;

/// The inclusive calendar interval one batch run covers.
///
/// Construction accepts any pair of dates. A range whose stop does not lie
/// after its start is empty: the paginator issues no requests for it and
/// returns an empty dataset.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_harvest::DateRange;
///
/// let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
/// let stop = NaiveDate::from_ymd_opt(2009, 12, 31).unwrap();
/// let range = DateRange::new(start, stop);
///
/// assert_eq!(range.start_year(), 2001);
/// assert_eq!(range.stop_year(), 2009);
/// assert!(!range.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    stop: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, stop: NaiveDate) -> Self {
        Self { start, stop }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn stop(&self) -> NaiveDate {
        self.stop
    }

    /// Year of the start date, as embedded in artifact names.
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    /// Year of the stop date, as embedded in artifact names.
    pub fn stop_year(&self) -> i32 {
        self.stop.year()
    }

    /// True when the range covers no day (stop at or before start).
    pub fn is_empty(&self) -> bool {
        self.stop <= self.start
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}
