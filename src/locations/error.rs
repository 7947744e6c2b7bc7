use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Failed to parse the trial location table")]
    Parse(#[from] csv::Error),
}
