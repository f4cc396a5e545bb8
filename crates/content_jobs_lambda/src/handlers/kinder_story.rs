use content_jobs_core::contract::{lenient_string, JobRequest};
use content_jobs_core::html::story_ready_html;
use content_jobs_core::prompts::kinder_story_prompt;
use content_jobs_core::storage_keys::{internal_object_key, AUDIO_MPEG};
use content_jobs_core::text::split_text;
use serde::Deserialize;
use tracing::info;

use crate::adapters::completion::{
    generate_speech_file, generate_text, CHAT_GPT_4O_MINI, SIZE_2X,
};
use crate::adapters::object_store::Artifact;
use crate::error::PipelineError;
use crate::handlers::pipeline::{store_artifact, JobDeps, JobOutcome, JobVariant};

/// Longest input the speech service accepts in one call.
pub const SPEECH_INPUT_LIMIT: usize = 1024;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StoryInputs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub behavior: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub favorite_theme: String,
}

/// Short children's story narrated in one or more audio parts.
///
/// The speech service stages each part under the internal folder; parts are
/// copied into the results folder in story order.
pub struct KinderStoryJob;

impl JobVariant for KinderStoryJob {
    type Inputs = StoryInputs;

    const NAME: &'static str = "kinder_story";
    const FAILURE_MESSAGE: &'static str = "Failed to generate story";

    fn execute(
        &self,
        request: &JobRequest<StoryInputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError> {
        let inputs = &request.custom_inputs;
        let story = generate_text(
            deps.completion,
            request,
            kinder_story_prompt(&inputs.behavior, &inputs.favorite_theme),
            CHAT_GPT_4O_MINI,
            SIZE_2X,
        )?;

        let parts = split_text(&story, SPEECH_INPUT_LIMIT);
        info!(
            component = "kinder_story",
            event = "story_split",
            parts = parts.len(),
            "story split for narration"
        );

        let mut audio_urls = Vec::with_capacity(parts.len());
        for part in parts {
            let file_name = generate_speech_file(deps.completion, request, part)?;
            let staged_key = internal_object_key(
                &deps.config.internal_folder,
                &request.execution_id,
                &file_name,
            );
            let audio = deps.store.read_object(&staged_key)?;
            let url = store_artifact(
                deps,
                &request.execution_id,
                &Artifact::new(file_name, AUDIO_MPEG, audio),
            )?;
            audio_urls.push(url);
        }

        Ok(
            JobOutcome::new("Story and audio generated successfully", story_ready_html(&audio_urls))
                .with_detail("story", story)
                .with_detail("audioUrls", audio_urls),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handlers::pipeline::handle_job_event;
    use crate::handlers::test_support::{chat_envelope, job_event, speech_envelope, Harness};

    fn story_event() -> serde_json::Value {
        job_event(json!({"behavior": "sharing toys", "favorite_theme": "dinosaurs"}))
    }

    #[test]
    fn narrates_each_part_and_copies_staged_audio() {
        let story = format!("{} {}", "a".repeat(1000), "b".repeat(300));
        let harness = Harness::new()
            .with_completion(chat_envelope(&story))
            .with_completion(speech_envelope("part-1.mp3"))
            .with_completion(speech_envelope("part-2.mp3"))
            .with_stored_object("internal/exec-1/part-1.mp3", b"audio-1")
            .with_stored_object("internal/exec-1/part-2.mp3", b"audio-2");

        let response =
            handle_job_event(&KinderStoryJob, story_event(), &harness.deps()).expect("job should run");

        assert_eq!(response.status_code, 200);
        let requests = harness.completion.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].service, "chat-gpt-4o-mini");
        assert_eq!(requests[0].size, "2x");
        assert_eq!(requests[1].service, "text_to_speech-tts-1");
        assert_eq!(requests[1].vendor_id.as_deref(), Some("vendor-3"));
        assert!(requests[1].prompt.is_none());
        assert_eq!(requests[1].input.as_deref(), Some("a".repeat(1000).as_str()));
        assert_eq!(requests[2].input.as_deref(), Some(format!(" {}", "b".repeat(300)).as_str()));

        assert_eq!(
            harness.store.reads(),
            vec!["internal/exec-1/part-1.mp3", "internal/exec-1/part-2.mp3"]
        );
        let writes = harness.store.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].key, "results/exec-1/part-1.mp3");
        assert_eq!(writes[0].content_type, "audio/mpeg");
        assert_eq!(writes[1].body, b"audio-2".to_vec());

        let body = response.body_json();
        assert_eq!(body["story"], story.as_str());
        assert_eq!(
            body["audioUrls"][1],
            "https://pi-test-bucket.s3.amazonaws.com/results/exec-1/part-2.mp3"
        );
        let reports = harness.callback.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].results.contains("Part 2"));
    }

    #[test]
    fn missing_staged_audio_fails_the_job() {
        let harness = Harness::new()
            .with_completion(chat_envelope("Dino shares."))
            .with_completion(speech_envelope("part-1.mp3"));

        let response =
            handle_job_event(&KinderStoryJob, story_event(), &harness.deps()).expect("job should run");

        assert_eq!(response.status_code, 500);
        assert!(harness.store.writes().is_empty());
        assert!(harness.callback.reports()[0]
            .results
            .contains("internal/exec-1/part-1.mp3"));
    }
}
