use crate::core::archive;
use crate::domain::model::DatasetSlug;
use crate::domain::ports::DatasetDownloader;
use std::path::{Path, PathBuf};

/// Download -> extract orchestration for a Kaggle dataset.
pub struct DatasetFetcher<D: DatasetDownloader> {
    downloader: D,
}

impl<D: DatasetDownloader> DatasetFetcher<D> {
    pub fn new(downloader: D) -> Self {
        Self { downloader }
    }

    /// Makes sure `data_dir/<name>` exists, downloading `data_dir/<name>.zip` first if needed.
    ///
    /// Returns `None` only when the download fails. The returned path is
    /// best-effort: a failed extraction is logged, not reported.
    pub async fn ensure_dataset(&self, slug: &DatasetSlug, data_dir: &Path) -> Option<PathBuf> {
        let zip_path = slug.zip_path(data_dir);
        let extract_path = slug.extract_path(data_dir);

        if !zip_path.exists() {
            tracing::info!(
                "🔍 {} not found. Starting download...",
                slug.zip_file_name()
            );
            match self.downloader.download(slug, data_dir).await {
                Ok(downloaded) => tracing::debug!("Downloaded archive: {}", downloaded.display()),
                Err(e) => {
                    tracing::error!("❌ Download of {} failed: {}", slug, e);
                    return None;
                }
            }
        } else {
            tracing::info!("📦 ZIP archive already exists: {}", zip_path.display());
        }

        if !extract_path.exists() {
            tracing::info!("Starting extraction to: {}", extract_path.display());
            if let Err(e) = archive::extract(&zip_path, &extract_path) {
                tracing::warn!("⚠️ Extraction did not complete, returning path anyway: {}", e);
            }
        } else {
            tracing::info!("📁 Data already extracted at: {}", extract_path.display());
        }

        Some(extract_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::DownloadError;
    use async_trait::async_trait;
    use std::fs::File;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn write_sample_zip(path: &Path) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file("images/scan.png", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"png bytes").unwrap();
        zip.finish().unwrap();
    }

    /// Writes a real zip where the Kaggle client would, or fails.
    #[derive(Clone)]
    struct MockDownloader {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl MockDownloader {
        fn new(fail: bool) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                fail,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DatasetDownloader for MockDownloader {
        async fn download(
            &self,
            slug: &DatasetSlug,
            output_dir: &Path,
        ) -> std::result::Result<PathBuf, DownloadError> {
            self.calls.lock().unwrap().push(slug.to_string());
            if self.fail {
                return Err(DownloadError::Unavailable("no credentials".to_string()));
            }
            let path = slug.zip_path(output_dir);
            write_sample_zip(&path);
            Ok(path)
        }
    }

    #[tokio::test]
    async fn test_happy_path_downloads_and_extracts() {
        let temp_dir = TempDir::new().unwrap();
        let downloader = MockDownloader::new(false);
        let fetcher = DatasetFetcher::new(downloader.clone());
        let slug = DatasetSlug::new("owner/my-dataset-name");

        let result = fetcher.ensure_dataset(&slug, temp_dir.path()).await;

        assert_eq!(result, Some(temp_dir.path().join("my-dataset-name")));
        assert_eq!(downloader.call_count(), 1);
        assert!(temp_dir
            .path()
            .join("my-dataset-name/images/scan.png")
            .is_file());
    }

    #[tokio::test]
    async fn test_skips_download_when_zip_exists() {
        let temp_dir = TempDir::new().unwrap();
        write_sample_zip(&temp_dir.path().join("my-dataset-name.zip"));
        let downloader = MockDownloader::new(false);
        let fetcher = DatasetFetcher::new(downloader.clone());

        let result = fetcher
            .ensure_dataset(&DatasetSlug::new("owner/my-dataset-name"), temp_dir.path())
            .await;

        assert_eq!(downloader.call_count(), 0);
        assert!(result.unwrap().join("images/scan.png").is_file());
    }

    #[tokio::test]
    async fn test_skips_extraction_when_target_exists() {
        let temp_dir = TempDir::new().unwrap();
        write_sample_zip(&temp_dir.path().join("my-dataset-name.zip"));
        let target = temp_dir.path().join("my-dataset-name");
        std::fs::create_dir(&target).unwrap();
        let fetcher = DatasetFetcher::new(MockDownloader::new(false));

        let result = fetcher
            .ensure_dataset(&DatasetSlug::new("owner/my-dataset-name"), temp_dir.path())
            .await;

        assert_eq!(result, Some(target.clone()));
        assert!(!target.join("images").exists());
    }

    #[tokio::test]
    async fn test_returns_none_when_download_fails() {
        let temp_dir = TempDir::new().unwrap();
        let downloader = MockDownloader::new(true);
        let fetcher = DatasetFetcher::new(downloader.clone());

        let result = fetcher
            .ensure_dataset(&DatasetSlug::new("owner/my-dataset-name"), temp_dir.path())
            .await;

        assert!(result.is_none());
        assert_eq!(downloader.call_count(), 1);
        assert!(!temp_dir.path().join("my-dataset-name").exists());
    }

    #[tokio::test]
    async fn test_returns_path_even_when_extraction_fails() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("broken.zip"), "not a zip").unwrap();
        let fetcher = DatasetFetcher::new(MockDownloader::new(false));

        let result = fetcher
            .ensure_dataset(&DatasetSlug::new("owner/broken"), temp_dir.path())
            .await;

        assert_eq!(result, Some(temp_dir.path().join("broken")));
    }
}
