use content_jobs_core::contract::{lenient_string, JobRequest};
use content_jobs_core::html::linkedin_ready_html;
use content_jobs_core::prompts::linkedin_post_prompt;
use content_jobs_core::storage_keys::{APPLICATION_JSON, RESULT_JSON_FILE};
use content_jobs_core::text::split_keywords;
use serde::Deserialize;
use tracing::info;

use crate::adapters::completion::{invoke_backend, CHAT_GPT_4O, SIZE_1X};
use crate::adapters::object_store::Artifact;
use crate::error::PipelineError;
use crate::feed::{filter_by_keywords, news_summary, parse_rss_items};
use crate::handlers::pipeline::{store_artifact, JobDeps, JobOutcome, JobVariant};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LinkedinInputs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub keywords: String,
}

/// LinkedIn post about current news items matching the user's keywords.
///
/// The full completion body is kept as `result.json`.
pub struct LinkedinPostJob;

impl JobVariant for LinkedinPostJob {
    type Inputs = LinkedinInputs;

    const NAME: &'static str = "linkedin_post";
    const FAILURE_MESSAGE: &'static str = "Failed to create LinkedIn post";

    fn execute(
        &self,
        request: &JobRequest<LinkedinInputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError> {
        let keywords = split_keywords(&request.custom_inputs.keywords);
        let feed = deps.fetcher.fetch_text(&deps.config.rss_feed_url)?;
        let articles = filter_by_keywords(parse_rss_items(&feed)?, &keywords);
        if articles.is_empty() {
            return Err(PipelineError::NoMatchingArticles);
        }
        info!(
            component = "linkedin_post",
            event = "articles_matched",
            count = articles.len(),
            "news articles matched keywords"
        );

        let completion_request = request.completion_request(
            linkedin_post_prompt(&news_summary(&articles)),
            CHAT_GPT_4O,
            SIZE_1X,
        );
        let envelope = invoke_backend(deps.completion, &completion_request)?;
        let result = envelope.success_body()?;
        let post = envelope.chat_content()?;

        let body = serde_json::to_vec_pretty(&result).map_err(|error| {
            PipelineError::Serialization {
                what: "completion result",
                reason: error.to_string(),
            }
        })?;
        let result_url = store_artifact(
            deps,
            &request.execution_id,
            &Artifact::new(RESULT_JSON_FILE, APPLICATION_JSON, body),
        )?;

        let html = linkedin_ready_html(
            &request.execution_id,
            request.user_id,
            request.product_id,
            &post,
        );
        Ok(JobOutcome::new("Task executed successfully", html)
            .with_detail("resultUrl", result_url)
            .with_detail("articleCount", articles.len()))
    }
}
