use crate::utils::error::{PipelineError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> PipelineError {
    PipelineError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

fn slug_pattern() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._-]+(/[A-Za-z0-9._-]+)+$").expect("slug pattern is valid")
    })
}

/// Kaggle 資料集識別碼，例如 `awsaf49/cbis-ddsm-breast-cancer-image-dataset`
pub fn validate_dataset_slug(field_name: &str, slug: &str) -> Result<()> {
    validate_non_empty_string(field_name, slug)?;

    if !slug_pattern().is_match(slug) {
        return Err(invalid(
            field_name,
            slug,
            "Dataset slug must look like 'owner/dataset-name'",
        ));
    }
    Ok(())
}

/// SageMaker endpoint names: alphanumerics and hyphens, at most 63 characters.
pub fn validate_endpoint_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    if name.len() > 63 {
        return Err(invalid(
            field_name,
            name,
            "Endpoint name must be at most 63 characters",
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        || name.starts_with('-')
        || name.ends_with('-')
    {
        return Err(invalid(
            field_name,
            name,
            "Endpoint name can only contain letters, digits and inner hyphens",
        ));
    }
    Ok(())
}
