use crate::utils::error::Result;
use crate::utils::validation::{validate_endpoint_name, validate_non_empty_string, Validate};
use std::env;

pub const DEFAULT_ENDPOINT_NAME: &str = "cbis-ddsm-serverless-endpoint";
pub const IMAGE_CONTENT_TYPE: &str = "application/x-image";

/// Serving-side settings. Built once at process start and handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub endpoint_name: String,
    pub content_type: String,
    pub region: Option<String>,
}

impl InferenceConfig {
    pub fn new(endpoint_name: impl Into<String>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            content_type: IMAGE_CONTENT_TYPE.to_string(),
            region: None,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    // 方便測試時注入變數，不必修改行程環境
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_name =
            lookup("ENDPOINT_NAME").unwrap_or_else(|| DEFAULT_ENDPOINT_NAME.to_string());
        Self {
            region: lookup("AWS_REGION").filter(|r| !r.trim().is_empty()),
            ..Self::new(endpoint_name)
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_NAME)
    }
}

impl Validate for InferenceConfig {
    fn validate(&self) -> Result<()> {
        validate_endpoint_name("endpoint_name", &self.endpoint_name)?;
        validate_non_empty_string("content_type", &self.content_type)?;
        if let Some(region) = &self.region {
            validate_non_empty_string("region", region)?;
        }

        tracing::debug!("✅ Inference configuration validation passed");
        Ok(())
    }
}
