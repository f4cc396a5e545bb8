use content_jobs_core::contract::StatusReport;
use reqwest::{Client, StatusCode};

use crate::adapters::block_on;
use crate::adapters::callback::StatusCallback;
use crate::adapters::web::PageFetcher;
use crate::error::PipelineError;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; content-jobs/0.1)";

pub fn build_client() -> Result<Client, PipelineError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| PipelineError::Fetch {
            url: String::new(),
            reason: format!("failed to build HTTP client: {error}"),
        })
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn get(&self, url: &str) -> Result<reqwest::Response, PipelineError> {
        let client = self.client.clone();
        let target = url.to_string();
        let fetch_error = |error: reqwest::Error| PipelineError::Fetch {
            url: url.to_string(),
            reason: error.to_string(),
        };

        block_on(async move { client.get(target).send().await })
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_error)
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, PipelineError> {
        let response = self.get(url)?;
        block_on(response.text()).map_err(|error| PipelineError::Fetch {
            url: url.to_string(),
            reason: error.to_string(),
        })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        let response = self.get(url)?;
        block_on(response.bytes())
            .map(|bytes| bytes.to_vec())
            .map_err(|error| PipelineError::Fetch {
                url: url.to_string(),
                reason: error.to_string(),
            })
    }
}

/// Posts status reports to the content-management webhook as JSON.
pub struct HttpStatusCallback {
    client: Client,
    url: String,
}

impl HttpStatusCallback {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl StatusCallback for HttpStatusCallback {
    fn send(&self, report: &StatusReport) -> Result<(), PipelineError> {
        let client = self.client.clone();
        let url = self.url.clone();
        let body = report.clone();

        let status = block_on(async move { client.post(url).json(&body).send().await })
            .map(|response| response.status())
            .map_err(|error| PipelineError::CallbackTransport(error.to_string()))?;

        if status != StatusCode::OK {
            return Err(PipelineError::CallbackStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
