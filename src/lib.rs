pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use adapters::{s3::S3ObjectStore, sagemaker::SageMakerEndpoint};

pub use adapters::kaggle::KaggleDownloader;
pub use config::InferenceConfig;
pub use crate::core::{archive::extract, dataset::DatasetFetcher, dispatcher::RecordDispatcher};
pub use utils::error::{PipelineError, Result};
