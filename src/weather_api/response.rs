use crate::types::observation::DailyObservation;
use crate::weather_api::error::QueryError;
use chrono::NaiveDate;
use serde::Deserialize;

/// One parsed page of the daily-history endpoint: the observations it carried
/// plus the coverage end date the server reported for it.
///
/// The coverage end may lie before the requested `toDate`; the paginator uses
/// it to decide where the next request starts.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPage {
    pub observations: Vec<DailyObservation>,
    pub coverage_end: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryResponse {
    metadata: ResponseMetadata,
    #[serde(default)]
    historical: Vec<HistoricalBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseMetadata {
    // The latest day this page actually has data for.
    to_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoricalBlock {
    #[serde(default)]
    data: Vec<RawDailyRecord>,
    #[serde(default)]
    grids_info: Vec<GridInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridInfo {
    data_source: String,
}

// Per-day records are spelled snake_case on the wire, unlike the camelCase
// envelope around them.
#[derive(Debug, Deserialize)]
struct RawDailyRecord {
    date: NaiveDate,
    max_temperature: Option<f64>,
    total_precipitation: Option<f64>,
    avg_wind_speed: Option<f64>,
    avg_relative_humidity: Option<f64>,
}

impl RawDailyRecord {
    fn into_observation(self, data_source: &str) -> DailyObservation {
        DailyObservation {
            date: self.date,
            max_temperature: self.max_temperature,
            total_precipitation: self.total_precipitation,
            avg_wind_speed: self.avg_wind_speed,
            avg_relative_humidity: self.avg_relative_humidity,
            data_source: data_source.to_string(),
        }
    }
}

/// Parses a raw daily-history body into a [`HistoryPage`].
///
/// A missing `metadata.toDate` is a parse failure (the paginator cannot
/// advance without it). A response without per-day records is a valid,
/// empty page; the data-source label is only required when records are
/// present, since it gets attached to each observation.
pub(crate) fn parse_page(body: &str, geocode: &str) -> Result<HistoryPage, QueryError> {
    let response: HistoryResponse =
        serde_json::from_str(body).map_err(|e| QueryError::ResponseParse {
            geocode: geocode.to_string(),
            source: e,
        })?;

    let coverage_end = response.metadata.to_date;
    let block = match response.historical.into_iter().next() {
        Some(block) => block,
        None => {
            return Ok(HistoryPage {
                observations: Vec::new(),
                coverage_end,
            })
        }
    };
    if block.data.is_empty() {
        return Ok(HistoryPage {
            observations: Vec::new(),
            coverage_end,
        });
    }

    let label = block
        .grids_info
        .into_iter()
        .next()
        .ok_or_else(|| QueryError::MissingDataSource {
            geocode: geocode.to_string(),
        })?
        .data_source;

    let observations = block
        .data
        .into_iter()
        .map(|raw| raw.into_observation(&label))
        .collect();

    Ok(HistoryPage {
        observations,
        coverage_end,
    })
}
