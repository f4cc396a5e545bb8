use content_jobs_lambda::handlers::auto_blog::AutoBlogJob;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_jobs_lambda::lambda::serve(AutoBlogJob).await
}
