use content_jobs_lambda::handlers::kinder_story::KinderStoryJob;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_jobs_lambda::lambda::serve(KinderStoryJob).await
}
