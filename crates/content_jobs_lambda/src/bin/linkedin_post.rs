use content_jobs_lambda::handlers::linkedin_post::LinkedinPostJob;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_jobs_lambda::lambda::serve(LinkedinPostJob).await
}
