use crate::domain::model::ExtractStats;
use crate::utils::progress;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

/// Failures of [`extract`]. Every variant has already been logged when returned.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Archive not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error: the archive is corrupted or not a valid ZIP ({0})")]
    Corrupt(String),

    #[error("Unexpected extraction error: {0}")]
    Unexpected(String),
}

impl From<ZipError> for ExtractError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
                ExtractError::Corrupt(err.to_string())
            }
            ZipError::Io(io_err) => io_err.into(),
            other => ExtractError::Unexpected(other.to_string()),
        }
    }
}

impl From<io::Error> for ExtractError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            // 解壓縮資料損壞或 CRC 不符
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                ExtractError::Corrupt(err.to_string())
            }
            _ => ExtractError::Unexpected(err.to_string()),
        }
    }
}

/// Extracts every entry of `archive_path` into `destination`, keeping relative paths.
///
/// The destination is created when missing and never cleared: existing files
/// stay, same-named files are overwritten. A missing archive leaves the
/// filesystem untouched. Failures are logged here; callers on the data-prep
/// path may ignore the returned error.
pub fn extract(
    archive_path: &Path,
    destination: &Path,
) -> std::result::Result<ExtractStats, ExtractError> {
    if !archive_path.exists() {
        tracing::error!("❌ Archive not found: {}", archive_path.display());
        return Err(ExtractError::NotFound(archive_path.to_path_buf()));
    }

    let result = prepare_destination(destination)
        .and_then(|_| extract_entries(archive_path, destination));

    match &result {
        Ok(stats) => {
            let absolute = fs::canonicalize(&stats.destination)
                .unwrap_or_else(|_| stats.destination.clone());
            tracing::info!("✅ Success! Files extracted to: {}", absolute.display());
        }
        Err(e) => tracing::error!("❌ {}", e),
    }

    result
}

fn prepare_destination(destination: &Path) -> std::result::Result<(), ExtractError> {
    if !destination.exists() {
        fs::create_dir_all(destination)
            .map_err(|e| ExtractError::Unexpected(e.to_string()))?;
        tracing::info!("📁 Created directory: {}", destination.display());
    }
    Ok(())
}

fn extract_entries(
    archive_path: &Path,
    destination: &Path,
) -> std::result::Result<ExtractStats, ExtractError> {
    let file = File::open(archive_path).map_err(|e| ExtractError::Unexpected(e.to_string()))?;
    let mut archive = ZipArchive::new(file)?;

    let total = archive.len();
    let archive_name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::info!("📦 Extracting {} entries from {}...", total, archive_name);

    let bar = progress::entry_bar(total as u64);
    bar.set_message("Extracting");

    let mut files = 0;
    let mut bytes_written = 0u64;

    for index in 0..total {
        let mut entry = archive.by_index(index)?;

        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("⚠️ Skipping entry outside destination: {}", entry.name());
            bar.inc(1);
            continue;
        };
        let out_path = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .map_err(|e| ExtractError::Unexpected(e.to_string()))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ExtractError::Unexpected(e.to_string()))?;
            }
            let mut out = File::create(&out_path)
                .map_err(|e| ExtractError::Unexpected(e.to_string()))?;
            bytes_written += io::copy(&mut entry, &mut out)?;
            files += 1;
        }

        bar.inc(1);
    }

    bar.finish_and_clear();
    tracing::debug!("Extracted {} files ({} bytes)", files, bytes_written);

    Ok(ExtractStats {
        entries: total,
        files,
        bytes_written,
        destination: destination.to_path_buf(),
    })
}
