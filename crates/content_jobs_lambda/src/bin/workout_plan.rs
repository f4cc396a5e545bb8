use content_jobs_lambda::handlers::workout_plan::WorkoutPlanJob;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_jobs_lambda::lambda::serve(WorkoutPlanJob).await
}
