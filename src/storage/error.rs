use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to serialize rows for artifact '{0}'")]
    CsvSerialize(String, #[source] csv::Error),

    #[error("Failed to finish the CSV buffer for artifact '{0}'")]
    CsvFlush(String, #[source] std::io::Error),

    #[error("I/O error staging artifact at '{0}'")]
    StagingIo(PathBuf, #[source] std::io::Error),

    #[error("Failed to move staged artifact into place at '{0}'")]
    StagingPersist(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed to download s3://{bucket}/{key}")]
    Download {
        bucket: String,
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to upload s3://{bucket}/{key}")]
    Upload {
        bucket: String,
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
