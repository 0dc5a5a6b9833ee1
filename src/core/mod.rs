pub mod archive;
pub mod dataset;
pub mod dispatcher;
pub mod tree;

pub use crate::domain::model::{
    BatchOutcome, Classification, DatasetSlug, Diagnosis, ExtractStats, ProbabilityPair,
    S3EventRecord,
};
pub use crate::domain::ports::{DatasetDownloader, DownloadError, InferenceEndpoint, ObjectStore};
pub use crate::utils::error::Result;
