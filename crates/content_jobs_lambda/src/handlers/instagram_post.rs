use content_jobs_core::contract::{lenient_string, JobRequest};
use content_jobs_core::html::instagram_ready_html;
use content_jobs_core::prompts::{instagram_caption_prompt, instagram_image_prompt};
use content_jobs_core::storage_keys::{file_name_from_url, IMAGE_PNG};
use serde::Deserialize;

use crate::adapters::completion::{generate_image_url, generate_text, CHAT_GPT_4O, SIZE_1X};
use crate::adapters::object_store::Artifact;
use crate::error::PipelineError;
use crate::handlers::pipeline::{store_artifact, JobDeps, JobOutcome, JobVariant};

const FALLBACK_IMAGE_FILE: &str = "instagram_post.png";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct InstagramInputs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub explanation: String,
}

/// Caption plus a matching image; the image keeps the file name the image
/// service gave it.
pub struct InstagramPostJob;

impl JobVariant for InstagramPostJob {
    type Inputs = InstagramInputs;

    const NAME: &'static str = "instagram_post";
    const FAILURE_MESSAGE: &'static str = "Failed to create Instagram post";

    fn execute(
        &self,
        request: &JobRequest<InstagramInputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError> {
        let explanation = &request.custom_inputs.explanation;

        let caption = generate_text(
            deps.completion,
            request,
            instagram_caption_prompt(explanation),
            CHAT_GPT_4O,
            SIZE_1X,
        )?;
        let image_url =
            generate_image_url(deps.completion, request, instagram_image_prompt(explanation))?;

        let image = deps.fetcher.fetch_bytes(&image_url)?;
        let file_name =
            file_name_from_url(&image_url).unwrap_or_else(|| FALLBACK_IMAGE_FILE.to_string());
        let stored_url = store_artifact(
            deps,
            &request.execution_id,
            &Artifact::new(file_name, IMAGE_PNG, image),
        )?;

        let html = instagram_ready_html(
            &request.execution_id,
            request.user_id,
            request.product_id,
            &caption,
        );
        Ok(JobOutcome::new("Task executed successfully", html)
            .with_detail("imageUrl", stored_url)
            .with_detail("caption", caption))
    }
}
