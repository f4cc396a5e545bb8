use content_jobs_core::contract::{lenient_string, JobRequest};
use content_jobs_core::html::logo_ready_html;
use content_jobs_core::prompts::logo_prompt;
use content_jobs_core::storage_keys::{IMAGE_PNG, LOGO_FILE};
use serde::Deserialize;

use crate::adapters::completion::generate_image_url;
use crate::adapters::object_store::Artifact;
use crate::error::PipelineError;
use crate::handlers::pipeline::{store_artifact, JobDeps, JobOutcome, JobVariant};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LogoInputs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub business_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub industry: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub style_preference: String,
}

/// Generates a logo image and stores it as `logo.png`.
pub struct LogoJob;

impl JobVariant for LogoJob {
    type Inputs = LogoInputs;

    const NAME: &'static str = "logo";
    const FAILURE_MESSAGE: &'static str = "Failed to generate logo";

    fn execute(
        &self,
        request: &JobRequest<LogoInputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError> {
        let inputs = &request.custom_inputs;
        let prompt = logo_prompt(
            &inputs.business_name,
            &inputs.industry,
            &inputs.style_preference,
        );

        let logo_url = generate_image_url(deps.completion, request, prompt)?;
        let image = deps.fetcher.fetch_bytes(&logo_url)?;
        let stored_url = store_artifact(
            deps,
            &request.execution_id,
            &Artifact::new(LOGO_FILE, IMAGE_PNG, image),
        )?;

        Ok(
            JobOutcome::new("Logo generated successfully", logo_ready_html(&logo_url))
                .with_detail("imageUrl", stored_url),
        )
    }
}
