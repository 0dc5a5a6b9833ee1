use crate::adapters::kaggle::DEFAULT_KAGGLE_API_BASE;
use crate::config::file::PipelineFile;
use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{validate_dataset_slug, validate_path, validate_url, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Parser)]
#[command(name = "mammo-pipeline")]
#[command(about = "Dataset preparation for the CBIS-DDSM lesion classifier")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Optional TOML file with [dataset] and [kaggle] sections")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Kaggle API base URL")]
    pub kaggle_api_base: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Download a dataset archive from Kaggle
    Download {
        /// Dataset slug, e.g. owner/dataset-name
        slug: Option<String>,
        #[arg(long)]
        data_dir: Option<String>,
    },
    /// Extract a zip archive
    Extract {
        archive: PathBuf,
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        to: PathBuf,
    },
    /// Print the directory structure (at most 5 files per directory)
    Tree { path: PathBuf },
    /// Download (if needed) and extract (if needed) a dataset
    Fetch {
        slug: Option<String>,
        #[arg(long)]
        data_dir: Option<String>,
        #[arg(long, help = "Print the extracted tree afterwards")]
        tree: bool,
    },
}

/// Dataset settings after merging CLI arguments over the TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSettings {
    pub slug: String,
    pub data_dir: PathBuf,
    pub kaggle_api_base: String,
}

impl CliConfig {
    pub fn load_file(&self) -> Result<PipelineFile> {
        match &self.config {
            Some(path) => {
                let file = PipelineFile::from_file(path)?;
                file.validate()?;
                Ok(file)
            }
            None => Ok(PipelineFile::default()),
        }
    }

    /// 命令列參數優先於設定檔
    pub fn dataset_settings(
        &self,
        slug: Option<&str>,
        data_dir: Option<&str>,
        file: &PipelineFile,
    ) -> Result<DatasetSettings> {
        let slug = slug
            .map(str::to_string)
            .or_else(|| file.dataset.slug.clone())
            .ok_or_else(|| PipelineError::ConfigError {
                message: "dataset slug is required (argument or [dataset].slug)".to_string(),
            })?;
        let data_dir = data_dir
            .map(str::to_string)
            .or_else(|| file.dataset.data_dir.clone())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let settings = DatasetSettings {
            slug,
            data_dir: PathBuf::from(data_dir),
            kaggle_api_base: self.kaggle_api_base(file),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn kaggle_api_base(&self, file: &PipelineFile) -> String {
        self.kaggle_api_base
            .clone()
            .or_else(|| file.kaggle.api_base.clone())
            .unwrap_or_else(|| DEFAULT_KAGGLE_API_BASE.to_string())
    }
}

impl Validate for DatasetSettings {
    fn validate(&self) -> Result<()> {
        validate_dataset_slug("slug", &self.slug)?;
        validate_path("data_dir", &self.data_dir.to_string_lossy())?;
        validate_url("kaggle_api_base", &self.kaggle_api_base)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch_command() {
        let cli = CliConfig::parse_from([
            "mammo-pipeline",
            "fetch",
            "owner/my-dataset-name",
            "--data-dir",
            "/tmp/data",
            "--tree",
        ]);
        match &cli.command {
            Command::Fetch { slug, data_dir, tree } => {
                assert_eq!(slug.as_deref(), Some("owner/my-dataset-name"));
                assert_eq!(data_dir.as_deref(), Some("/tmp/data"));
                assert!(*tree);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_extract_defaults_to_data_dir() {
        let cli = CliConfig::parse_from(["mammo-pipeline", "extract", "archive.zip"]);
        match cli.command {
            Command::Extract { archive, to } => {
                assert_eq!(archive, PathBuf::from("archive.zip"));
                assert_eq!(to, PathBuf::from("data"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = CliConfig::parse_from([
            "mammo-pipeline",
            "--kaggle-api-base",
            "http://localhost:1234",
            "tree",
            ".",
        ]);
        let mut file = PipelineFile::default();
        file.dataset.slug = Some("file/slug".to_string());
        file.dataset.data_dir = Some("file-data".to_string());
        file.kaggle.api_base = Some("https://example.com/api".to_string());

        let settings = cli
            .dataset_settings(Some("cli/slug"), None, &file)
            .unwrap();

        assert_eq!(settings.slug, "cli/slug");
        assert_eq!(settings.data_dir, PathBuf::from("file-data"));
        assert_eq!(settings.kaggle_api_base, "http://localhost:1234");
    }

    #[test]
    fn test_missing_slug_is_config_error() {
        let cli = CliConfig::parse_from(["mammo-pipeline", "tree", "."]);
        let err = cli
            .dataset_settings(None, None, &PipelineFile::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::ConfigError { .. }));
    }
}
