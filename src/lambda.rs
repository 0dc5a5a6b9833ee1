#[cfg(feature = "lambda")]
use aws_config::{BehaviorVersion, Region};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use mammo_pipeline::core::BatchOutcome;
#[cfg(feature = "lambda")]
use mammo_pipeline::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use mammo_pipeline::{InferenceConfig, RecordDispatcher, S3ObjectStore, SageMakerEndpoint};
#[cfg(feature = "lambda")]
use serde_json::Value;

#[cfg(feature = "lambda")]
type Dispatcher = RecordDispatcher<S3ObjectStore, SageMakerEndpoint>;

#[cfg(feature = "lambda")]
async fn function_handler(
    dispatcher: &Dispatcher,
    event: LambdaEvent<Value>,
) -> Result<BatchOutcome, Error> {
    // 錯誤直接交給 runtime，回報為 invocation failure
    let outcome = dispatcher
        .handle(&event.payload)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    tracing::info!(status = outcome.status_code, "Batch processed");
    Ok(outcome)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時讀取一次，整個 process 共用
    let config = InferenceConfig::from_env();
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    tracing::info!("Using inference endpoint: {}", config.endpoint_name);

    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    let aws = loader.load().await;

    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&aws));
    let endpoint = SageMakerEndpoint::new(aws_sdk_sagemakerruntime::Client::new(&aws));
    let dispatcher = RecordDispatcher::new(store, endpoint, config);

    let dispatcher = &dispatcher;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(dispatcher, event).await
    }))
    .await
}
