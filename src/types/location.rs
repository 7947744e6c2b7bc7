use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use weather_harvest::LatLon;
///
/// let wageningen = LatLon(51.9692, 5.6654);
/// assert_eq!(wageningen.0, 51.9692); // Latitude
/// assert_eq!(wageningen.1, 5.6654); // Longitude
/// assert_eq!(wageningen.to_string(), "51.9692,5.6654");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl fmt::Display for LatLon {
    /// Formats as `"lat,lon"`, the form the daily-history API takes as its
    /// `geocode` parameter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// One row of the input location table: a trial site to harvest weather for.
///
/// Deserialized from the table by header name; columns beyond these three are
/// ignored. The `trial_id` is unique within a batch and ends up embedded in
/// the output artifact name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub trial_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRecord {
    pub fn lat_lon(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocode_formatting_matches_api_expectation() {
        let point = LatLon(45.52, -122.68);
        assert_eq!(point.to_string(), "45.52,-122.68");
    }

    #[test]
    fn record_exposes_its_coordinates() {
        let record = LocationRecord {
            trial_id: "T042".to_string(),
            latitude: -33.87,
            longitude: 151.21,
        };
        assert_eq!(record.lat_lon(), LatLon(-33.87, 151.21));
    }
}
