use content_jobs_core::contract::{lenient_string, JobRequest};
use content_jobs_core::html::{
    chat_text_to_html, escape_html, workout_document_html, workout_ready_html,
};
use content_jobs_core::prompts::{workout_plan_prompt, WorkoutProfile};
use content_jobs_core::storage_keys::{APPLICATION_PDF, WORKOUT_PROGRAM_FILE};
use serde::Deserialize;

use crate::adapters::completion::{generate_text, CHAT_GPT_4O, SIZE_2X};
use crate::adapters::object_store::Artifact;
use crate::error::PipelineError;
use crate::extract::html_to_lines;
use crate::handlers::pipeline::{store_artifact, JobDeps, JobOutcome, JobVariant};
use crate::render::render_text_pdf;

const DOCUMENT_TITLE: &str = "Personalized Workout Plan";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WorkoutInputs {
    #[serde(default, deserialize_with = "lenient_string")]
    pub goal: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience_level: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub preferred_workout_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub available_equipment: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub workout_frequency: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub height: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub health_conditions: String,
}

impl WorkoutInputs {
    fn profile(&self) -> WorkoutProfile<'_> {
        WorkoutProfile {
            goal: &self.goal,
            experience_level: &self.experience_level,
            preferred_workout_time: &self.preferred_workout_time,
            available_equipment: &self.available_equipment,
            workout_frequency: &self.workout_frequency,
            age: &self.age,
            weight: &self.weight,
            height: &self.height,
            health_conditions: &self.health_conditions,
        }
    }
}

/// Personalized workout program rendered to `program.pdf`.
pub struct WorkoutPlanJob;

impl JobVariant for WorkoutPlanJob {
    type Inputs = WorkoutInputs;

    const NAME: &'static str = "workout_plan";
    const FAILURE_MESSAGE: &'static str = "Failed to generate workout plan";

    fn execute(
        &self,
        request: &JobRequest<WorkoutInputs>,
        deps: &JobDeps<'_>,
    ) -> Result<JobOutcome, PipelineError> {
        let inputs = &request.custom_inputs;
        let plan = generate_text(
            deps.completion,
            request,
            workout_plan_prompt(&inputs.profile()),
            CHAT_GPT_4O,
            SIZE_2X,
        )?;

        let document =
            workout_document_html(&escape_html(&inputs.goal), &chat_text_to_html(&plan));
        let lines: Vec<String> = html_to_lines(&document)
            .into_iter()
            .skip_while(|line| line.as_str() == DOCUMENT_TITLE)
            .collect();
        let pdf = render_text_pdf(DOCUMENT_TITLE, &lines)?;

        let pdf_url = store_artifact(
            deps,
            &request.execution_id,
            &Artifact::new(WORKOUT_PROGRAM_FILE, APPLICATION_PDF, pdf),
        )?;

        Ok(
            JobOutcome::new("Workout plan generated successfully", workout_ready_html())
                .with_detail("pdfUrl", pdf_url),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handlers::pipeline::handle_job_event;
    use crate::handlers::test_support::{chat_envelope, job_event, Harness};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle)
    }

    #[test]
    fn renders_plan_into_program_pdf() {
        let harness = Harness::new()
            .with_completion(chat_envelope("Day 1: Squats 3x10\nDay 2: Rest"));
        let event = job_event(json!({
            "goal": "strength",
            "experience_level": "beginner",
            "preferred_workout_time": "evening",
            "available_equipment": "barbell",
            "workout_frequency": "3 times a week",
            "age": 41,
            "weight": 80.5,
            "height": 182,
            "health_conditions": "none"
        }));

        let response =
            handle_job_event(&WorkoutPlanJob, event, &harness.deps()).expect("job should run");

        assert_eq!(response.status_code, 200);
        let requests = harness.completion.requests();
        assert_eq!(requests[0].service, "chat-gpt-4o");
        assert_eq!(requests[0].size, "2x");
        let prompt = requests[0].prompt.as_deref().expect("prompt");
        assert!(prompt.contains("41-year-old beginner"));
        assert!(prompt.contains("80.5 kg"));

        let writes = harness.store.writes();
        assert_eq!(writes[0].key, "results/exec-1/program.pdf");
        assert_eq!(writes[0].content_type, "application/pdf");
        assert!(writes[0].body.starts_with(b"%PDF"));
        assert!(contains(&writes[0].body, b"(Goal: strength) Tj"));
        assert!(contains(&writes[0].body, b"(Day 1: Squats 3x10) Tj"));

        assert_eq!(
            response.body_json()["pdfUrl"],
            "https://pi-test-bucket.s3.amazonaws.com/results/exec-1/program.pdf"
        );
        assert!(harness.callback.reports()[0]
            .results
            .contains("Word of Caution"));
    }
}
