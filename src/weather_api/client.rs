use crate::types::location::LatLon;
use crate::weather_api::error::QueryError;
use crate::weather_api::response::{parse_page, HistoryPage};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;

/// A source of bounded daily-history pages.
///
/// The production implementation is [`HistoryClient`]; tests and dry runs
/// script pages through this seam instead of standing up an HTTP server.
#[async_trait]
pub trait DailyHistorySource: Send + Sync {
    /// Requests daily data for `point` from `from` through `to` inclusive.
    ///
    /// The upstream may cover less than the requested window; the returned
    /// page reports how far its data actually reaches.
    async fn fetch_page(
        &self,
        point: LatLon,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HistoryPage, QueryError>;
}

/// Client for the daily-history endpoint of the weather API.
///
/// Expects an HTTP client that already carries bearer authorization as a
/// default header (see [`crate::build_authorized_client`]) and reuses it for
/// every sequential request of the batch.
pub struct HistoryClient {
    http: Client,
    endpoint: String,
    units: String,
    data_source: String,
}

impl HistoryClient {
    pub fn new(http: Client, base_url: &str, units: &str, data_source: &str) -> Self {
        let endpoint = format!("{}/historical/daily", base_url.trim_end_matches('/'));
        Self {
            http,
            endpoint,
            units: units.to_string(),
            data_source: data_source.to_string(),
        }
    }
}

#[async_trait]
impl DailyHistorySource for HistoryClient {
    async fn fetch_page(
        &self,
        point: LatLon,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HistoryPage, QueryError> {
        let geocode = point.to_string();
        let from_param = from.to_string();
        let to_param = to.to_string();
        debug!(
            "Requesting daily history for {} from {} to {}",
            geocode, from_param, to_param
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("geocode", geocode.as_str()),
                ("units", self.units.as_str()),
                ("fromDate", from_param.as_str()),
                ("toDate", to_param.as_str()),
                ("dataSource", self.data_source.as_str()),
            ])
            .send()
            .await
            .map_err(|e| QueryError::NetworkRequest(self.endpoint.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", self.endpoint, e);
                return Err(if let Some(status) = e.status() {
                    QueryError::HttpStatus {
                        url: self.endpoint.clone(),
                        status,
                        source: e,
                    }
                } else {
                    QueryError::NetworkRequest(self.endpoint.clone(), e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| QueryError::BodyRead(self.endpoint.clone(), e))?;
        parse_page(&body, &geocode)
    }
}
