use content_jobs_lambda::handlers::logo::LogoJob;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_jobs_lambda::lambda::serve(LogoJob).await
}
