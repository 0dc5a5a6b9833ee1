use crate::config::InferenceConfig;
use crate::domain::model::{BatchOutcome, Classification, ProbabilityPair, S3EventRecord};
use crate::domain::ports::{InferenceEndpoint, ObjectStore};
use crate::utils::error::{PipelineError, Result};
use serde_json::Value;

/// Handles S3 "object created" batches: fetch, infer, classify.
///
/// Fail-fast: the first store, endpoint or decoding error aborts the batch
/// and is returned to the caller; later records are not touched.
pub struct RecordDispatcher<S: ObjectStore, E: InferenceEndpoint> {
    store: S,
    endpoint: E,
    config: InferenceConfig,
}

impl<S: ObjectStore, E: InferenceEndpoint> RecordDispatcher<S, E> {
    pub fn new(store: S, endpoint: E, config: InferenceConfig) -> Self {
        Self {
            store,
            endpoint,
            config,
        }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Processes `event["Records"]` in order. The outcome names the diagnosis
    /// of the last record only.
    pub async fn handle(&self, event: &Value) -> Result<BatchOutcome> {
        tracing::info!("Receiving event from S3...");

        let records = event
            .get("Records")
            .and_then(Value::as_array)
            .ok_or_else(|| PipelineError::MalformedEvent {
                message: "event has no 'Records' array".to_string(),
            })?;

        let mut last = None;
        for (index, raw) in records.iter().enumerate() {
            let record: S3EventRecord =
                serde_json::from_value(raw.clone()).map_err(|e| PipelineError::MalformedEvent {
                    message: format!("record {}: {}", index, e),
                })?;

            let classification = self.process_record(&record).await?;
            last = Some(classification.diagnosis);
        }

        // 只回報最後一筆的診斷
        let last = last.ok_or(PipelineError::EmptyBatch)?;
        Ok(BatchOutcome::completed(last))
    }

    pub async fn process_record(&self, record: &S3EventRecord) -> Result<Classification> {
        let (bucket, key) = (record.bucket(), record.key());
        tracing::info!("Processing file: s3://{}/{}", bucket, key);

        let image = self.store.get(bucket, key).await?;

        tracing::info!("Invoking endpoint: {}", self.config.endpoint_name);
        let body = self
            .endpoint
            .invoke(&self.config.endpoint_name, &self.config.content_type, &image)
            .await?;

        let probabilities = parse_probabilities(&body)?;
        let (diagnosis, confidence) =
            probabilities
                .classify()
                .ok_or_else(|| PipelineError::MalformedResponse {
                    message: format!(
                        "BENIGN result for {} but element [0] is not numeric",
                        key
                    ),
                })?;

        let classification = Classification {
            bucket: bucket.to_string(),
            key: key.to_string(),
            diagnosis,
            confidence,
        };
        tracing::info!("{}", classification.summary_line());

        Ok(classification)
    }
}

/// Reads `[prob_benign, prob_malignant, ..]` from the endpoint body.
///
/// Element [1] must be numeric. Element [0] must be present but is only read
/// as a number when the result turns out BENIGN.
pub fn parse_probabilities(body: &[u8]) -> Result<ProbabilityPair> {
    let value: Value = serde_json::from_slice(body)?;

    let items = value
        .as_array()
        .ok_or_else(|| PipelineError::MalformedResponse {
            message: format!("expected a JSON array, got {}", value),
        })?;

    let malignant = items
        .get(1)
        .and_then(Value::as_f64)
        .ok_or_else(|| PipelineError::MalformedResponse {
            message: format!("missing numeric element [1] in {}", value),
        })?;

    // [1] 存在，所以 [0] 一定存在
    Ok(match items[0].as_f64() {
        Some(benign) => ProbabilityPair::new(benign, malignant),
        None => ProbabilityPair::malignant_only(malignant),
    })
}
