pub mod auto_blog;
pub mod brand_blog;
pub mod instagram_post;
pub mod kinder_story;
pub mod linkedin_post;
pub mod logo;
pub mod pipeline;
pub mod workout_plan;

#[cfg(test)]
mod test_support;
