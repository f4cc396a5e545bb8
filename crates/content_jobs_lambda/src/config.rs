use crate::error::PipelineError;

pub const BUCKET_ENV: &str = "PI_EXECUTION_S3_BUCKET_NAME";
pub const RESULTS_FOLDER_ENV: &str = "PI_RESULTS_FOLDER";
pub const INTERNAL_FOLDER_ENV: &str = "PI_INTERNAL_FOLDER";
pub const COMPLETION_FUNCTION_ENV: &str = "PI_OPENAI_FUNCTION";
pub const CHAT_FUNCTION_ENV: &str = "PI_OPENAI_CHAT_FUNCTION";
pub const CALLBACK_URL_ENV: &str = "PI_CALLBACK_URL";
pub const RSS_FEED_URL_ENV: &str = "PI_RSS_FEED_URL";

pub const DEFAULT_CALLBACK_URL: &str =
    "https://promptintellect.com/wp-json/product-extension/v1/lambda-results";
pub const DEFAULT_RSS_FEED_URL: &str = "https://rss.nytimes.com/services/xml/rss/nyt/World.xml";
pub const DEFAULT_INTERNAL_FOLDER: &str = "internal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub bucket: String,
    pub results_folder: String,
    pub internal_folder: String,
    pub completion_function: String,
    pub callback_url: String,
    pub rss_feed_url: String,
}

impl JobConfig {
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup; blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PipelineError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bucket = read(BUCKET_ENV).ok_or(PipelineError::MissingConfig(BUCKET_ENV))?;
        let results_folder =
            read(RESULTS_FOLDER_ENV).ok_or(PipelineError::MissingConfig(RESULTS_FOLDER_ENV))?;
        let completion_function = read(COMPLETION_FUNCTION_ENV)
            .or_else(|| read(CHAT_FUNCTION_ENV))
            .ok_or(PipelineError::MissingConfig(COMPLETION_FUNCTION_ENV))?;

        Ok(Self {
            bucket,
            results_folder,
            internal_folder: read(INTERNAL_FOLDER_ENV)
                .unwrap_or_else(|| DEFAULT_INTERNAL_FOLDER.to_string()),
            completion_function,
            callback_url: read(CALLBACK_URL_ENV).unwrap_or_else(|| DEFAULT_CALLBACK_URL.to_string()),
            rss_feed_url: read(RSS_FEED_URL_ENV).unwrap_or_else(|| DEFAULT_RSS_FEED_URL.to_string()),
        })
    }
}
