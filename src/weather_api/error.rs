use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body for {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("Failed to parse daily history response for geocode {geocode}")]
    ResponseParse {
        geocode: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Daily history response for geocode {geocode} carries data but no data-source label")]
    MissingDataSource { geocode: String },

    #[error("Pagination stalled at {cursor}: upstream reported coverage only through {coverage_end}")]
    PaginationStalled {
        cursor: NaiveDate,
        coverage_end: NaiveDate,
    },

    #[error("Reported coverage end {0} cannot be advanced by one day")]
    CoverageOverflow(NaiveDate),
}
