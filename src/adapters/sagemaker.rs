use crate::domain::ports::InferenceEndpoint;
use crate::utils::error::{PipelineError, Result};
use aws_sdk_sagemakerruntime::error::DisplayErrorContext;
use aws_sdk_sagemakerruntime::primitives::Blob;
use aws_sdk_sagemakerruntime::Client as SageMakerClient;

#[derive(Debug, Clone)]
pub struct SageMakerEndpoint {
    client: SageMakerClient,
}

impl SageMakerEndpoint {
    pub fn new(client: SageMakerClient) -> Self {
        Self { client }
    }
}

impl InferenceEndpoint for SageMakerEndpoint {
    async fn invoke(
        &self,
        endpoint_name: &str,
        content_type: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let output = self
            .client
            .invoke_endpoint()
            .endpoint_name(endpoint_name)
            .content_type(content_type)
            .body(Blob::new(payload.to_vec()))
            .send()
            .await
            .map_err(|e| PipelineError::Inference {
                endpoint: endpoint_name.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(output.body.map(Blob::into_inner).unwrap_or_default())
    }
}
