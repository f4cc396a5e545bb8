use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_s3::primitives::ByteStream;
use content_jobs_core::contract::{CompletionEnvelope, CompletionRequest};

use crate::adapters::block_on;
use crate::adapters::completion::CompletionBackend;
use crate::adapters::object_store::ArtifactStore;
use crate::error::PipelineError;

pub struct S3ArtifactStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl S3ArtifactStore {
    pub fn new(bucket: impl Into<String>, s3_client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket: bucket.into(),
            s3_client,
        }
    }
}

impl ArtifactStore for S3ArtifactStore {
    fn write_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), PipelineError> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let content_type = content_type.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        block_on(async move {
            client
                .put_object()
                .bucket(bucket)
                .key(object_key)
                .content_type(content_type)
                .body(ByteStream::from(body_bytes))
                .send()
                .await
                .map(|_| ())
        })
        .map_err(|error| PipelineError::Storage {
            operation: "write",
            key: key.to_string(),
            reason: DisplayErrorContext(&error).to_string(),
        })
    }

    fn read_object(&self, key: &str) -> Result<Vec<u8>, PipelineError> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let client = self.s3_client.clone();
        let storage_error = |reason: String| PipelineError::Storage {
            operation: "read",
            key: key.to_string(),
            reason,
        };

        let output = block_on(async move {
            client
                .get_object()
                .bucket(bucket)
                .key(object_key)
                .send()
                .await
        })
        .map_err(|error| storage_error(DisplayErrorContext(&error).to_string()))?;

        block_on(output.body.collect())
            .map(|data| data.into_bytes().to_vec())
            .map_err(|error| storage_error(error.to_string()))
    }
}

/// Calls the completion function synchronously and decodes its envelope.
pub struct LambdaCompletionBackend {
    function_name: String,
    lambda_client: aws_sdk_lambda::Client,
}

impl LambdaCompletionBackend {
    pub fn new(function_name: impl Into<String>, lambda_client: aws_sdk_lambda::Client) -> Self {
        Self {
            function_name: function_name.into(),
            lambda_client,
        }
    }
}

impl CompletionBackend for LambdaCompletionBackend {
    fn invoke(&self, request: &CompletionRequest) -> Result<CompletionEnvelope, PipelineError> {
        let request_payload =
            serde_json::to_vec(request).map_err(|error| PipelineError::Serialization {
                what: "completion request",
                reason: error.to_string(),
            })?;
        let client = self.lambda_client.clone();
        let function_name = self.function_name.clone();

        let output = block_on(async move {
            client
                .invoke()
                .function_name(function_name)
                .invocation_type(InvocationType::RequestResponse)
                .set_payload(Some(request_payload.into()))
                .send()
                .await
        })
        .map_err(|error| PipelineError::Invoke(DisplayErrorContext(&error).to_string()))?;

        let payload = output
            .payload()
            .map(|blob| blob.as_ref().to_vec())
            .unwrap_or_default();
        if let Some(function_error) = output.function_error() {
            return Err(PipelineError::Invoke(format!(
                "{function_error}: {}",
                String::from_utf8_lossy(&payload)
            )));
        }

        serde_json::from_slice(&payload).map_err(|error| {
            PipelineError::Invoke(format!(
                "unreadable completion response ({error}): {}",
                String::from_utf8_lossy(&payload)
            ))
        })
    }
}
