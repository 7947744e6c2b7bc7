use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of weather for one location.
///
/// Feature fields follow the daily-history query set; the upstream reports
/// `null` for days it carries no value for, so every feature is optional.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub max_temperature: Option<f64>,       // °C
    pub total_precipitation: Option<f64>,   // mm
    pub avg_wind_speed: Option<f64>,        // km/h
    pub avg_relative_humidity: Option<f64>, // percent
    /// Grid the upstream sourced this day from, e.g. `"TWC"`.
    #[serde(rename = "datasource")]
    pub data_source: String,
}

/// The accumulated daily series for one location.
///
/// Pages arrive in chronological order and may restate the boundary day the
/// previous page ended on; [`LocationDataset::append_page`] drops those, so
/// the sequence stays strictly ascending by date with no duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationDataset {
    observations: Vec<DailyObservation>,
}

impl LocationDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|obs| obs.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|obs| obs.date)
    }

    /// Appends one page of observations, skipping entries dated at or before
    /// the last day already accumulated.
    pub fn append_page(&mut self, page: Vec<DailyObservation>) {
        match self.last_date() {
            None => self.observations.extend(page),
            Some(last) => self
                .observations
                .extend(page.into_iter().filter(|obs| obs.date > last)),
        }
    }

    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<DailyObservation> {
        self.observations
    }
}
