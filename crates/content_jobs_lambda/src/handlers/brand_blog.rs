use content_jobs_core::contract::{
    lenient_string, JobRequest, ValidationError, MISSING_FIELDS_MESSAGE,
};
use content_jobs_core::html::blog_ready_html;
use content_jobs_core::prompts::brand_blog_prompt;
use content_jobs_core::storage_keys::{BLOG_POST_FILE, TEXT_PLAIN};
use serde::Deserialize;
use tracing::info;

use crate::adapters::completion::{generate_text, CHAT_GPT_4O, SIZE_2X};
use crate::adapters::object_store::Artifact;
use crate::error::PipelineError;
use crate::extract::site_profile_text;
use crate::handlers::pipeline::{store_artifact, JobDeps, JobOutcome, JobVariant};

pub const SITE_PROFILE_LIMIT: usize = 1000;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BrandBlogInputs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub business_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub website_url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target: String,
}

/// Blog post promoting a brand, grounded in text crawled from its website.
pub struct BrandBlogJob;

impl JobVariant for BrandBlogJob {
    type Inputs = BrandBlogInputs;

    const NAME: &'static str = "brand_blog";
    const FAILURE_MESSAGE: &'static str = "Failed to generate blog post";

    fn validate(&self, request: &JobRequest<BrandBlogInputs>) -> Result<(), ValidationError> {
        request.validate_identity()?;
        if request.custom_inputs.website_url.trim().is_empty() {
            return Err(ValidationError::new(MISSING_FIELDS_MESSAGE));
        }
        Ok(())
    }

    fn execute(
        &self,
        request: &JobRequest<BrandBlogInputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError> {
        let inputs = &request.custom_inputs;

        let page = deps.fetcher.fetch_text(inputs.website_url.trim())?;
        let site_text = site_profile_text(&page, SITE_PROFILE_LIMIT);
        info!(
            component = "brand_blog",
            event = "site_crawled",
            chars = site_text.chars().count(),
            "website profile extracted"
        );

        let post = generate_text(
            deps.completion,
            request,
            brand_blog_prompt(&inputs.business_name, &site_text, &inputs.target),
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
            blog_ready_html("Smart Brand Blog Post"),
        )
        .with_detail("txtUrl", txt_url))
    }
}
