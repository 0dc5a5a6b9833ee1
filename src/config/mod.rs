pub mod file;
pub mod inference;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, DatasetSettings};
pub use file::PipelineFile;
pub use inference::InferenceConfig;
