use crate::storage::error::PersistError;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use log::{debug, info};

/// A durable key-value blob store.
///
/// The pipeline needs exactly two operations: fetching the input location
/// table and persisting output artifacts. Keeping the seam this narrow lets
/// tests run against an in-memory map instead of a bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PersistError>;

    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), PersistError>;
}

/// S3-backed [`ObjectStore`] using region and credentials from the ambient
/// environment (profile, instance role, or environment variables).
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
        }
    }

    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, PersistError> {
        debug!("Downloading s3://{}/{}", bucket, key);
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| PersistError::Download {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: Box::new(aws_sdk_s3::Error::from(e)),
            })?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| PersistError::Download {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: Box::new(e),
            })?;
        Ok(body.into_bytes().to_vec())
    }

    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), PersistError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| PersistError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: Box::new(aws_sdk_s3::Error::from(e)),
            })?;
        info!("Uploaded {} bytes to s3://{}/{}", size, bucket, key);
        Ok(())
    }
}
