use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed event record: {message}")]
    MalformedEvent { message: String },

    #[error("Object store error for s3://{bucket}/{key}: {message}")]
    ObjectStore {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Inference endpoint '{endpoint}' failed: {message}")]
    Inference { endpoint: String, message: String },

    #[error("Malformed inference response: {message}")]
    MalformedResponse { message: String },

    #[error("Event batch contained no records")]
    EmptyBatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Data,
}

impl PipelineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PipelineError::ConfigError { .. }
            | PipelineError::InvalidConfigValueError { .. }
            | PipelineError::TomlError(_) => ErrorCategory::Configuration,
            PipelineError::Inference { .. } => ErrorCategory::Network,
            PipelineError::IoError(_) | PipelineError::ObjectStore { .. } => ErrorCategory::Storage,
            PipelineError::SerializationError(_)
            | PipelineError::MalformedEvent { .. }
            | PipelineError::MalformedResponse { .. }
            | PipelineError::EmptyBatch => ErrorCategory::Data,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check command-line arguments, the TOML file and environment variables",
            ErrorCategory::Network => "Check network access and that the remote service is reachable",
            ErrorCategory::Storage => "Check that the path or object exists and is accessible",
            ErrorCategory::Data => "Check the input event or the model response format",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
