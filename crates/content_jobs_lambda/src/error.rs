use content_jobs_core::contract::ContentError;
use thiserror::Error;

/// Any failure after the request was accepted.
///
/// Every variant ends the job with a failure callback and a 500 response; the
/// display text is what the callback HTML shows to the user.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0} must be configured")]
    MissingConfig(&'static str),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("failed to invoke completion backend: {0}")]
    Invoke(String),

    #[error("failed to {operation} object '{key}': {reason}")]
    Storage {
        operation: &'static str,
        key: String,
        reason: String,
    },

    #[error("Unexpected status code: {status}")]
    CallbackStatus { status: u16 },

    #[error("failed to send status callback: {0}")]
    CallbackTransport(String),

    #[error("failed to fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    #[error("search failed: {0}")]
    Search(String),

    #[error("failed to parse feed: {0}")]
    Feed(String),

    #[error("No articles found matching the keywords")]
    NoMatchingArticles,

    #[error("failed to render PDF: {0}")]
    Render(String),

    #[error("failed to serialize {what}: {reason}")]
    Serialization { what: &'static str, reason: String },
}
