use content_jobs_lambda::handlers::instagram_post::InstagramPostJob;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_jobs_lambda::lambda::serve(InstagramPostJob).await
}
