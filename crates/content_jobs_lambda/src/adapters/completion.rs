use content_jobs_core::contract::{CompletionEnvelope, CompletionRequest, JobRequest};
use tracing::info;

use crate::error::PipelineError;

pub const CHAT_GPT_4O: &str = "chat-gpt-4o";
pub const CHAT_GPT_4O_MINI: &str = "chat-gpt-4o-mini";
pub const IMAGE_DALL_E_3: &str = "image-dall-e-3";
pub const TEXT_TO_SPEECH_TTS_1: &str = "text_to_speech-tts-1";

pub const SIZE_1X: &str = "1x";
pub const SIZE_2X: &str = "2x";

/// Synchronous request/response call into the completion backend.
pub trait CompletionBackend {
    fn invoke(&self, request: &CompletionRequest) -> Result<CompletionEnvelope, PipelineError>;
}

pub fn invoke_backend(
    backend: &dyn CompletionBackend,
    request: &CompletionRequest,
) -> Result<CompletionEnvelope, PipelineError> {
    info!(
        component = "completion",
        event = "completion_invoked",
        service = %request.service,
        size = %request.size,
        "invoking completion backend"
    );
    let envelope = backend.invoke(request)?;
    info!(
        component = "completion",
        event = "completion_returned",
        service = %request.service,
        status_code = envelope.status_code,
        "completion backend returned"
    );
    Ok(envelope)
}

pub fn generate_text<I>(
    backend: &dyn CompletionBackend,
    job: &JobRequest<I>,
    prompt: impl Into<String>,
    service: &str,
    size: &str,
) -> Result<String, PipelineError> {
    let request = job.completion_request(prompt, service, size);
    Ok(invoke_backend(backend, &request)?.chat_content()?)
}

pub fn generate_image_url<I>(
    backend: &dyn CompletionBackend,
    job: &JobRequest<I>,
    prompt: impl Into<String>,
) -> Result<String, PipelineError> {
    let request = job.completion_request(prompt, IMAGE_DALL_E_3, SIZE_1X);
    Ok(invoke_backend(backend, &request)?.image_url()?)
}

/// Returns the name of the audio object the speech service staged in the
/// internal folder.
pub fn generate_speech_file<I>(
    backend: &dyn CompletionBackend,
    job: &JobRequest<I>,
    input: impl Into<String>,
) -> Result<String, PipelineError> {
    let request = job.speech_request(input, TEXT_TO_SPEECH_TTS_1, SIZE_2X);
    Ok(invoke_backend(backend, &request)?.file_name()?)
}
