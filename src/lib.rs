mod auth;
mod error;
mod locations;
mod pipeline;
mod storage;
mod types;
mod weather_api;

pub use error::HarvestError;
pub use pipeline::*;

pub use auth::error::AuthError;
pub use auth::token::{build_authorized_client, AccessToken, TokenProvider};

pub use locations::error::LocationError;
pub use locations::source::parse_locations;

pub use storage::artifact::{artifact_name, dataset_to_csv, stage_locally};
pub use storage::error::PersistError;
pub use storage::object_store::{ObjectStore, S3ObjectStore};

pub use types::date_range::DateRange;
pub use types::location::{LatLon, LocationRecord};
pub use types::observation::{DailyObservation, LocationDataset};

pub use weather_api::client::{DailyHistorySource, HistoryClient};
pub use weather_api::error::QueryError;
pub use weather_api::paginator::fetch_daily_range;
pub use weather_api::response::HistoryPage;
