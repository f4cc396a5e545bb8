use content_jobs_core::contract::{
    parse_job_request, JobRequest, JobResponse, ReportStatus, ValidationError,
};
use content_jobs_core::html::error_html;
use content_jobs_core::storage_keys::{public_object_url, result_object_key};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{error, info, info_span, warn};

use crate::adapters::callback::StatusCallback;
use crate::adapters::completion::CompletionBackend;
use crate::adapters::object_store::{Artifact, ArtifactStore};
use crate::adapters::web::{PageFetcher, SearchProvider};
use crate::config::JobConfig;
use crate::error::PipelineError;

/// Everything a job may call out to during one invocation.
pub struct JobDeps<'a> {
    pub config: &'a JobConfig,
    pub completion: &'a dyn CompletionBackend,
    pub store: &'a dyn ArtifactStore,
    pub callback: &'a dyn StatusCallback,
    pub fetcher: &'a dyn PageFetcher,
    pub search: &'a dyn SearchProvider,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub message: &'static str,
    pub results_html: String,
    /// Extra fields merged into the success response body.
    pub details: Map<String, Value>,
}

impl JobOutcome {
    pub fn new(message: &'static str, results_html: impl Into<String>) -> Self {
        Self {
            message,
            results_html: results_html.into(),
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// One content job: its inputs, optional validation and the generation
/// pipeline that produces and stores its artifacts.
pub trait JobVariant {
    type Inputs: DeserializeOwned + Default;

    const NAME: &'static str;
    const FAILURE_MESSAGE: &'static str;

    fn validate(&self, _request: &JobRequest<Self::Inputs>) -> Result<(), ValidationError> {
        Ok(())
    }

    fn execute(
        &self,
        request: &JobRequest<Self::Inputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError>;
}

/// Writes `artifact` under the execution's results folder and returns its
/// public URL.
pub fn store_artifact(
    deps: &JobDeps<'_>,
    execution_id: &str,
    artifact: &Artifact,
) -> Result<String, PipelineError> {
    let key = result_object_key(&deps.config.results_folder, execution_id, &artifact.file_name);
    deps.store
        .write_object(&key, &artifact.body, artifact.content_type)?;
    info!(
        component = "pipeline",
        event = "artifact_written",
        key = %key,
        content_type = artifact.content_type,
        bytes = artifact.body.len(),
        "artifact written"
    );
    Ok(public_object_url(&deps.config.bucket, &key))
}

/// Runs one job invocation end to end.
///
/// Client input problems yield a 400 without touching any dependency.
/// Failures after that send a failure callback and yield a 500; only a
/// failing failure callback is returned as an error.
pub fn handle_job_event<V: JobVariant>(
    variant: &V,
    event: Value,
    deps: &JobDeps<'_>,
) -> Result<JobResponse, PipelineError> {
    let request = match parse_job_request::<V::Inputs>(event) {
        Ok(value) => value,
        Err(error) => return Ok(reject(V::NAME, &error)),
    };
    if let Err(error) = variant.validate(&request) {
        return Ok(reject(V::NAME, &error));
    }

    let span = info_span!("content_job", variant = V::NAME, execution_id = %request.execution_id);
    let _entered = span.enter();
    info!(
        component = "pipeline",
        event = "job_started",
        user_id = request.user_id,
        product_id = request.product_id,
        "job started"
    );

    match run_job(variant, &request, deps) {
        Ok(outcome) => {
            info!(component = "pipeline", event = "job_succeeded", "job succeeded");
            let mut body = outcome.details;
            body.insert("message".to_string(), Value::from(outcome.message));
            Ok(JobResponse::success(Value::Object(body)))
        }
        Err(failure) => {
            let reason = failure.to_string();
            error!(
                component = "pipeline",
                event = "job_failed",
                error = %reason,
                "job failed"
            );
            let report = request.status_report(ReportStatus::Failed, error_html(&reason));
            deps.callback.send(&report)?;
            info!(
                component = "pipeline",
                event = "callback_sent",
                status = "failed",
                "failure callback sent"
            );
            Ok(JobResponse::failure(V::FAILURE_MESSAGE, &reason))
        }
    }
}

fn run_job<V: JobVariant>(
    variant: &V,
    request: &JobRequest<V::Inputs>,
    deps: &JobDeps<'_>,
) -> Result<JobOutcome, PipelineError> {
    let outcome = variant.execute(request, deps)?;
    let report = request.status_report(ReportStatus::Successful, outcome.results_html.clone());
    deps.callback.send(&report)?;
    info!(
        component = "pipeline",
        event = "callback_sent",
        status = "successful",
        "success callback sent"
    );
    Ok(outcome)
}

fn reject(variant: &str, error: &ValidationError) -> JobResponse {
    warn!(
        component = "pipeline",
        event = "request_rejected",
        variant,
        error = %error,
        "request rejected"
    );
    JobResponse::client_error(error.message())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handlers::logo::LogoJob;
    use crate::handlers::test_support::{chat_envelope, image_envelope, Harness};
    use content_jobs_core::contract::{CompletionEnvelope, ReportStatus};

    fn logo_event() -> Value {
        json!({
            "execution_id": "exec-1",
            "user_id": 11,
            "product_id": 22,
            "token": "tok",
            "custom_inputs": {
                "business_name": "Acme",
                "industry": "bakery",
                "style_preference": "minimalist"
            }
        })
    }

    #[test]
    fn malformed_payload_returns_400_without_calls() {
        let harness = Harness::new();

        let response = handle_job_event(&LogoJob, json!("not an object"), &harness.deps())
            .expect("rejection is not an error");

        assert_eq!(response.status_code, 400);
        assert!(harness.completion.requests().is_empty());
        assert!(harness.store.writes().is_empty());
        assert!(harness.callback.reports().is_empty());
    }

    #[test]
    fn success_sends_exactly_one_successful_callback() {
        let harness = Harness::new()
            .with_completion(image_envelope("https://images.example/logo.png"))
            .with_page("https://images.example/logo.png", b"png-bytes");

        let response =
            handle_job_event(&LogoJob, logo_event(), &harness.deps()).expect("job should run");

        assert_eq!(response.status_code, 200);
        let reports = harness.callback.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, ReportStatus::Successful);
        assert_eq!(reports[0].execution_id, "exec-1");
        assert_eq!(reports[0].token, "tok");
    }

    #[test]
    fn non_200_backend_sends_failure_callback_with_backend_error() {
        let harness = Harness::new().with_completion(CompletionEnvelope {
            status_code: 500,
            body: json!({"error": "model overloaded"}),
        });

        let response =
            handle_job_event(&LogoJob, logo_event(), &harness.deps()).expect("job should run");

        assert_eq!(response.status_code, 500);
        let body = response.body_json();
        assert_eq!(body["message"], "Failed to generate logo");
        assert!(body["error"]
            .as_str()
            .expect("error text")
            .contains("status code 500"));

        let reports = harness.callback.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, ReportStatus::Failed);
        assert!(reports[0].results.contains("<strong>Error: </strong>"));
        assert!(reports[0].results.contains("model overloaded"));
        assert!(harness.store.writes().is_empty());
    }

    #[test]
    fn rejected_success_callback_turns_into_failure() {
        let harness = Harness::new()
            .with_completion(image_envelope("https://images.example/logo.png"))
            .with_page("https://images.example/logo.png", b"png-bytes");
        harness.callback.reject_statuses(&[ReportStatus::Successful], 503);

        let response =
            handle_job_event(&LogoJob, logo_event(), &harness.deps()).expect("job should run");

        assert_eq!(response.status_code, 500);
        let reports = harness.callback.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].status, ReportStatus::Failed);
        assert!(reports[1].results.contains("Unexpected status code: 503"));
    }

    #[test]
    fn failing_failure_callback_propagates() {
        let harness = Harness::new().with_completion(chat_envelope("not an image"));
        harness
            .callback
            .reject_statuses(&[ReportStatus::Successful, ReportStatus::Failed], 500);

        let error = handle_job_event(&LogoJob, logo_event(), &harness.deps())
            .expect_err("failure callback error should propagate");

        assert!(matches!(error, PipelineError::CallbackStatus { status: 500 }));
    }

    #[test]
    fn artifact_keys_follow_results_layout() {
        let harness = Harness::new();
        let deps = harness.deps();

        let url = store_artifact(
            &deps,
            "exec-9",
            &Artifact::new("blog_post.txt", "text/plain", b"post".to_vec()),
        )
        .expect("store should succeed");

        let writes = harness.store.writes();
        assert_eq!(writes[0].key, "results/exec-9/blog_post.txt");
        assert_eq!(writes[0].content_type, "text/plain");
        assert_eq!(url, "https://pi-test-bucket.s3.amazonaws.com/results/exec-9/blog_post.txt");
    }
}
