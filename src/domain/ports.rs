use crate::domain::model::DatasetSlug;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Read side of an object store (S3 in production).
pub trait ObjectStore: Send + Sync {
    fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Synchronous request/response model endpoint (SageMaker in production).
pub trait InferenceEndpoint: Send + Sync {
    fn invoke(
        &self,
        endpoint_name: &str,
        content_type: &str,
        payload: &[u8],
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[derive(Error, Debug)]
pub enum DownloadError {
    /// Provider could not be set up (credentials missing or unreadable).
    #[error("download provider unavailable: {0}")]
    Unavailable(String),

    #[error("download failed: {0}")]
    Transfer(String),
}

#[async_trait]
pub trait DatasetDownloader: Send + Sync {
    /// Returns the path of the downloaded archive.
    async fn download(
        &self,
        slug: &DatasetSlug,
        output_dir: &Path,
    ) -> std::result::Result<PathBuf, DownloadError>;
}
