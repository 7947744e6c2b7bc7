use crate::auth::error::AuthError;
use crate::locations::error::LocationError;
use crate::storage::error::PersistError;
use crate::weather_api::error::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Locations(#[from] LocationError),
}
