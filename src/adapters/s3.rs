use crate::domain::ports::ObjectStore;
use crate::utils::error::{PipelineError, Result};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::Client as S3Client;

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let store_error = |message: String| PipelineError::ObjectStore {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };

        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                // NoSuchKey / AccessDenied 等服務端錯誤碼
                let code = e.code().unwrap_or("Unknown").to_string();
                store_error(format!("{}: {}", code, DisplayErrorContext(&e)))
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| store_error(format!("Failed to collect S3 data: {}", e)))?;

        Ok(data.into_bytes().to_vec())
    }
}
