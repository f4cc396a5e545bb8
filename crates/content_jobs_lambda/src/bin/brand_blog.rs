use content_jobs_lambda::handlers::brand_blog::BrandBlogJob;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_jobs_lambda::lambda::serve(BrandBlogJob).await
}
