// Adapters layer: concrete implementations of the domain ports.

pub mod kaggle;

#[cfg(feature = "lambda")]
pub mod s3;

#[cfg(feature = "lambda")]
pub mod sagemaker;
