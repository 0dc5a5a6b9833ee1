use crate::domain::model::DatasetSlug;
use crate::domain::ports::{DatasetDownloader, DownloadError};
use crate::utils::progress;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub const DEFAULT_KAGGLE_API_BASE: &str = "https://www.kaggle.com/api/v1";

fn transfer<E: Display>(err: E) -> DownloadError {
    DownloadError::Transfer(err.to_string())
}

/// Same fields as `~/.kaggle/kaggle.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl KaggleCredentials {
    pub fn resolve() -> std::result::Result<Self, DownloadError> {
        Self::resolve_from(|name| env::var(name).ok())
    }

    /// `KAGGLE_USERNAME` + `KAGGLE_KEY`, else `kaggle.json` under
    /// `KAGGLE_CONFIG_DIR` or `~/.kaggle`.
    pub fn resolve_from<F>(lookup: F) -> std::result::Result<Self, DownloadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let (Some(username), Some(key)) = (lookup("KAGGLE_USERNAME"), lookup("KAGGLE_KEY")) {
            return Ok(Self { username, key });
        }

        let config_dir = lookup("KAGGLE_CONFIG_DIR")
            .map(PathBuf::from)
            .or_else(|| {
                lookup("HOME")
                    .or_else(|| lookup("USERPROFILE"))
                    .map(|home| PathBuf::from(home).join(".kaggle"))
            })
            .ok_or_else(|| {
                DownloadError::Unavailable("cannot locate the Kaggle config directory".to_string())
            })?;

        let path = config_dir.join("kaggle.json");
        let content = std::fs::read_to_string(&path).map_err(|e| {
            DownloadError::Unavailable(format!("could not read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            DownloadError::Unavailable(format!("invalid {}: {}", path.display(), e))
        })
    }
}

/// Kaggle dataset downloads over the public REST API.
///
/// Credentials are resolved on each download unless given up front, so a
/// machine without Kaggle access can still use every other command.
#[derive(Debug, Clone)]
pub struct KaggleDownloader {
    client: Client,
    api_base: String,
    credentials: Option<KaggleCredentials>,
}

impl KaggleDownloader {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: KaggleCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn download_url(&self, slug: &DatasetSlug) -> String {
        format!(
            "{}/datasets/download/{}",
            self.api_base.trim_end_matches('/'),
            slug
        )
    }

    fn credentials(&self) -> std::result::Result<KaggleCredentials, DownloadError> {
        match &self.credentials {
            Some(credentials) => Ok(credentials.clone()),
            None => KaggleCredentials::resolve(),
        }
    }

    async fn fetch(
        &self,
        slug: &DatasetSlug,
        output_dir: &Path,
        credentials: &KaggleCredentials,
    ) -> std::result::Result<PathBuf, DownloadError> {
        let url = self.download_url(slug);
        tracing::debug!("GET {}", url);

        let mut response = self
            .client
            .get(&url)
            .basic_auth(&credentials.username, Some(&credentials.key))
            .send()
            .await
            .map_err(transfer)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Transfer(format!(
                "Kaggle returned HTTP {} for {}",
                status, slug
            )));
        }

        let zip_path = slug.zip_path(output_dir);
        let bar = progress::byte_bar(response.content_length().unwrap_or(0));
        bar.set_message(slug.zip_file_name());

        let mut file = tokio::fs::File::create(&zip_path).await.map_err(transfer)?;
        let streamed: std::result::Result<(), DownloadError> = async {
            while let Some(chunk) = response.chunk().await.map_err(transfer)? {
                file.write_all(&chunk).await.map_err(transfer)?;
                bar.inc(chunk.len() as u64);
            }
            file.flush().await.map_err(transfer)
        }
        .await;
        bar.finish_and_clear();

        if let Err(e) = streamed {
            // 不留下半個檔案，否則下次會被當成已下載
            let _ = tokio::fs::remove_file(&zip_path).await;
            return Err(e);
        }

        Ok(zip_path)
    }
}

impl Default for KaggleDownloader {
    fn default() -> Self {
        Self::new(DEFAULT_KAGGLE_API_BASE)
    }
}

#[async_trait]
impl DatasetDownloader for KaggleDownloader {
    async fn download(
        &self,
        slug: &DatasetSlug,
        output_dir: &Path,
    ) -> std::result::Result<PathBuf, DownloadError> {
        if !output_dir.exists() {
            tokio::fs::create_dir_all(output_dir)
                .await
                .map_err(transfer)?;
        }

        tracing::info!("🌐 Connecting to Kaggle to download {}...", slug);

        let credentials = match self.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::error!("❌ Failed to connect to Kaggle. Check that kaggle.json is configured.");
                tracing::error!("Error detail: {}", e);
                return Err(e);
            }
        };

        match self.fetch(slug, output_dir, &credentials).await {
            Ok(path) => {
                tracing::info!("✅ Download complete: {}", path.display());
                Ok(path)
            }
            Err(e) => {
                tracing::error!("❌ Error during download: {}", e);
                Err(e)
            }
        }
    }
}
