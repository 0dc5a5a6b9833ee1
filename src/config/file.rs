use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{validate_dataset_slug, validate_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `pipeline.toml` for the data-prep CLI.
///
/// ```toml
/// [dataset]
/// slug = "awsaf49/cbis-ddsm-breast-cancer-image-dataset"
/// data_dir = "data"
///
/// [kaggle]
/// api_base = "https://www.kaggle.com/api/v1"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineFile {
    #[serde(default)]
    pub dataset: DatasetSection,
    #[serde(default)]
    pub kaggle: KaggleSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSection {
    pub slug: Option<String>,
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KaggleSection {
    pub api_base: Option<String>,
}

impl PipelineFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }
}

/// 替換環境變數 (例如 ${DATA_DIR})，未設定的保持原樣
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PipelineError::ConfigError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });
    Ok(result.into_owned())
}

impl Validate for PipelineFile {
    fn validate(&self) -> Result<()> {
        if let Some(slug) = &self.dataset.slug {
            validate_dataset_slug("dataset.slug", slug)?;
        }
        if let Some(data_dir) = &self.dataset.data_dir {
            validate_path("dataset.data_dir", data_dir)?;
        }
        if let Some(api_base) = &self.kaggle.api_base {
            validate_url("kaggle.api_base", api_base)?;
        }
        Ok(())
    }
}
