//! Prompt builders for every content job.
//!
//! Each builder embeds the caller's parameters verbatim; no escaping or
//! trimming is applied so the backend sees exactly what the user typed.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutProfile<'a> {
    pub goal: &'a str,
    pub experience_level: &'a str,
    pub preferred_workout_time: &'a str,
    pub available_equipment: &'a str,
    pub workout_frequency: &'a str,
    pub age: &'a str,
    pub weight: &'a str,
    pub height: &'a str,
    pub health_conditions: &'a str,
}

pub fn search_query_prompt(keywords: &str) -> String {
    format!(
        "Generate a detailed and precise search query based on the following keywords: {keywords}.\n\
         The query should be optimized to find relevant and high-quality articles. \
         Your answer should be just the search query based on the keywords.\n\
         Reply with the bare query and nothing before or after it; it will be used as-is in \
         https://www.google.com/search?q=<your-query>"
    )
}

pub fn article_blog_prompt(article_text: &str, keywords: &str, article_urls: &[String]) -> String {
    let references = serde_json::to_string(article_urls).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Generate a blog post in Markdown format based on the following articles:\n\
         {article_text}\n\n\
         Keywords: {keywords}\n\n\
         The blog post should be informative, engaging, and relevant to the keywords.\n\
         Finish the post with the reference to articles {references}"
    )
}

pub fn brand_blog_prompt(business_name: &str, site_text: &str, target: &str) -> String {
    format!(
        "Generate a blog post in Markdown format for {business_name} based on the content \
         from the website: {site_text}. Target to promote or focus on in the post: {target}."
    )
}

pub fn workout_plan_prompt(profile: &WorkoutProfile<'_>) -> String {
    format!(
        "Create a workout plan for a {age}-year-old {level} aiming for {goal}.\n\
         They prefer to work out in the {time} using the following equipment: {equipment}.\n\
         The user plans to work out {frequency}.\n\
         Their weight is {weight} kg and height is {height} cm.\n\
         Health conditions: {conditions}.",
        age = profile.age,
        level = profile.experience_level,
        goal = profile.goal,
        time = profile.preferred_workout_time,
        equipment = profile.available_equipment,
        frequency = profile.workout_frequency,
        weight = profile.weight,
        height = profile.height,
        conditions = profile.health_conditions,
    )
}

pub fn logo_prompt(business_name: &str, industry: &str, style_preference: &str) -> String {
    format!(
        "Create a logo for a business named {business_name} in the {industry} industry. \
         The preferred style is {style_preference}."
    )
}

pub fn instagram_caption_prompt(explanation: &str) -> String {
    format!("Create an Instagram post caption based on the following explanation:\n\n{explanation}")
}

pub fn instagram_image_prompt(explanation: &str) -> String {
    format!("Generate an image based on the following explanation:\n\n{explanation}")
}

pub fn linkedin_post_prompt(news_summary: &str) -> String {
    format!("Write a LinkedIn post based on the following news articles:\n\n{news_summary}")
}

pub fn kinder_story_prompt(behavior: &str, favorite_theme: &str) -> String {
    format!(
        "Create a very short story for kids under 8 about {behavior} with a theme of {favorite_theme}."
    )
}
