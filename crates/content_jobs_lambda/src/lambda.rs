//! Lambda runtime wiring shared by every content job binary.

use content_jobs_core::contract::JobResponse;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::error;

use crate::adapters::aws::{LambdaCompletionBackend, S3ArtifactStore};
use crate::adapters::http::{build_client, HttpPageFetcher, HttpStatusCallback};
use crate::adapters::web::GoogleResultScraper;
use crate::config::JobConfig;
use crate::error::PipelineError;
use crate::handlers::pipeline::{handle_job_event, JobDeps, JobVariant};
use crate::logging;

/// SDK and HTTP clients built once per cold start.
pub struct RuntimeClients {
    pub s3_client: aws_sdk_s3::Client,
    pub lambda_client: aws_sdk_lambda::Client,
    pub http_client: reqwest::Client,
}

impl RuntimeClients {
    pub async fn load() -> Result<Self, PipelineError> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Ok(Self {
            s3_client: aws_sdk_s3::Client::new(&aws_config),
            lambda_client: aws_sdk_lambda::Client::new(&aws_config),
            http_client: build_client()?,
        })
    }
}

/// Handles one invocation against live AWS and HTTP adapters.
///
/// Configuration is read per invocation so a missing variable fails the
/// invocation before anything is called.
pub fn run_job<V: JobVariant>(
    variant: &V,
    event: Value,
    clients: &RuntimeClients,
) -> Result<JobResponse, PipelineError> {
    let config = JobConfig::from_env()?;

    let completion = LambdaCompletionBackend::new(
        config.completion_function.clone(),
        clients.lambda_client.clone(),
    );
    let store = S3ArtifactStore::new(config.bucket.clone(), clients.s3_client.clone());
    let callback = HttpStatusCallback::new(clients.http_client.clone(), config.callback_url.clone());
    let fetcher = HttpPageFetcher::new(clients.http_client.clone());
    let search = GoogleResultScraper::new(&fetcher);

    let deps = JobDeps {
        config: &config,
        completion: &completion,
        store: &store,
        callback: &callback,
        fetcher: &fetcher,
        search: &search,
    };
    handle_job_event(variant, event, &deps)
}

/// Serves `variant` until the Lambda runtime shuts down.
pub async fn serve<V: JobVariant + Sync>(variant: V) -> Result<(), Error> {
    logging::init();
    let clients = RuntimeClients::load().await?;

    let variant = &variant;
    let clients = &clients;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        run_job(variant, event.payload, clients).map_err(|failure| {
            error!(
                component = "lambda",
                event = "invocation_failed",
                variant = V::NAME,
                error = %failure,
                "invocation failed"
            );
            Error::from(failure)
        })
    }))
    .await
}
