use content_jobs_core::contract::{lenient_string, JobRequest};
use content_jobs_core::html::blog_ready_html;
use content_jobs_core::prompts::{article_blog_prompt, search_query_prompt};
use content_jobs_core::storage_keys::{BLOG_POST_FILE, TEXT_PLAIN};
use serde::Deserialize;
use tracing::info;

use crate::adapters::completion::{generate_text, CHAT_GPT_4O, SIZE_1X, SIZE_2X};
use crate::adapters::object_store::Artifact;
use crate::adapters::web::{gather_article_text, ARTICLE_TEXT_BUDGET};
use crate::error::PipelineError;
use crate::handlers::pipeline::{store_artifact, JobDeps, JobOutcome, JobVariant};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AutoBlogInputs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub keywords: String,
}

/// Search-augmented blog post: the backend writes a search query, the top
/// results are read, and the backend writes a post referencing them.
pub struct AutoBlogJob;

impl JobVariant for AutoBlogJob {
    type Inputs = AutoBlogInputs;

    const NAME: &'static str = "auto_blog";
    const FAILURE_MESSAGE: &'static str = "Failed to generate blog post";

    fn execute(
        &self,
        request: &JobRequest<AutoBlogInputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError> {
        let keywords = &request.custom_inputs.keywords;

        let raw_query = generate_text(
            deps.completion,
            request,
            search_query_prompt(keywords),
            CHAT_GPT_4O,
            SIZE_1X,
        )?;
        let query = clean_query(&raw_query);
        let article_urls = deps.search.search(&query)?;
        info!(
            component = "auto_blog",
            event = "articles_found",
            query = %query,
            count = article_urls.len(),
            "search returned article links"
        );

        let article_text = gather_article_text(deps.fetcher, &article_urls, ARTICLE_TEXT_BUDGET);
        let post = generate_text(
            deps.completion,
            request,
            article_blog_prompt(&article_text, keywords, &article_urls),
            CHAT_GPT_4O,
            SIZE_2X,
        )?;

        let txt_url = store_artifact(
            deps,
            &request.execution_id,
            &Artifact::new(BLOG_POST_FILE, TEXT_PLAIN, post.into_bytes()),
        )?;

        Ok(JobOutcome::new(
            "Blog post generated successfully",
            blog_ready_html("AutoBlog Generator"),
        )
        .with_detail("txtUrl", txt_url))
    }
}

fn clean_query(raw: &str) -> String {
    raw.trim()
        .trim_matches(|character| character == '"' || character == '\'' || character == '`')
        .trim()
        .to_string()
}
