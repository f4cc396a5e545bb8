use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use content_jobs_core::contract::{CompletionEnvelope, CompletionRequest, ReportStatus, StatusReport};
use serde_json::{json, Value};

use crate::adapters::callback::StatusCallback;
use crate::adapters::completion::CompletionBackend;
use crate::adapters::object_store::ArtifactStore;
use crate::adapters::web::{PageFetcher, SearchProvider};
use crate::config::{JobConfig, DEFAULT_CALLBACK_URL};
use crate::error::PipelineError;
use crate::handlers::pipeline::JobDeps;

pub const TEST_FEED_URL: &str = "https://feeds.example/world.xml";

pub fn chat_envelope(content: &str) -> CompletionEnvelope {
    CompletionEnvelope::ok(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

pub fn image_envelope(url: &str) -> CompletionEnvelope {
    CompletionEnvelope::ok(json!({"data": [{"url": url}]}))
}

pub fn speech_envelope(file_name: &str) -> CompletionEnvelope {
    CompletionEnvelope::ok(json!({"file_name": file_name}))
}

#[derive(Default)]
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<CompletionEnvelope>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .expect("lock should not be poisoned")
            .clone()
    }
}

impl CompletionBackend for ScriptedCompletion {
    fn invoke(&self, request: &CompletionRequest) -> Result<CompletionEnvelope, PipelineError> {
        self.requests
            .lock()
            .expect("lock should not be poisoned")
            .push(request.clone());
        self.responses
            .lock()
            .expect("lock should not be poisoned")
            .pop_front()
            .ok_or_else(|| PipelineError::Invoke("no scripted response left".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct RecordingStore {
    existing: HashMap<String, Vec<u8>>,
    writes: Mutex<Vec<StoredObject>>,
    reads: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn writes(&self) -> Vec<StoredObject> {
        self.writes
            .lock()
            .expect("lock should not be poisoned")
            .clone()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads
            .lock()
            .expect("lock should not be poisoned")
            .clone()
    }
}

impl ArtifactStore for RecordingStore {
    fn write_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), PipelineError> {
        self.writes
            .lock()
            .expect("lock should not be poisoned")
            .push(StoredObject {
                key: key.to_string(),
                body: body.to_vec(),
                content_type: content_type.to_string(),
            });
        Ok(())
    }

    fn read_object(&self, key: &str) -> Result<Vec<u8>, PipelineError> {
        self.reads
            .lock()
            .expect("lock should not be poisoned")
            .push(key.to_string());
        self.existing
            .get(key)
            .cloned()
            .ok_or_else(|| PipelineError::Storage {
                operation: "read",
                key: key.to_string(),
                reason: "NoSuchKey".to_string(),
            })
    }
}

#[derive(Default)]
pub struct RecordingCallback {
    reports: Mutex<Vec<StatusReport>>,
    rejected: Mutex<Option<(Vec<ReportStatus>, u16)>>,
}

impl RecordingCallback {
    pub fn reports(&self) -> Vec<StatusReport> {
        self.reports
            .lock()
            .expect("lock should not be poisoned")
            .clone()
    }

    /// Makes the webhook answer `status` for reports with the given statuses.
    pub fn reject_statuses(&self, statuses: &[ReportStatus], status: u16) {
        *self.rejected.lock().expect("lock should not be poisoned") =
            Some((statuses.to_vec(), status));
    }
}

impl StatusCallback for RecordingCallback {
    fn send(&self, report: &StatusReport) -> Result<(), PipelineError> {
        self.reports
            .lock()
            .expect("lock should not be poisoned")
            .push(report.clone());
        match &*self.rejected.lock().expect("lock should not be poisoned") {
            Some((statuses, status)) if statuses.contains(&report.status) => {
                Err(PipelineError::CallbackStatus { status: *status })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .expect("lock should not be poisoned")
            .clone()
    }
}

impl PageFetcher for MapFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, PipelineError> {
        self.fetch_bytes(url)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        self.requested
            .lock()
            .expect("lock should not be poisoned")
            .push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| PipelineError::Fetch {
            url: url.to_string(),
            reason: "HTTP status client error (404 Not Found)".to_string(),
        })
    }
}

#[derive(Default)]
pub struct FixedSearch {
    results: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl FixedSearch {
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .expect("lock should not be poisoned")
            .clone()
    }
}

impl SearchProvider for FixedSearch {
    fn search(&self, query: &str) -> Result<Vec<String>, PipelineError> {
        self.queries
            .lock()
            .expect("lock should not be poisoned")
            .push(query.to_string());
        Ok(self.results.clone())
    }
}

pub struct Harness {
    pub config: JobConfig,
    pub completion: ScriptedCompletion,
    pub store: RecordingStore,
    pub callback: RecordingCallback,
    pub fetcher: MapFetcher,
    pub search: FixedSearch,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        Self {
            config: JobConfig {
                bucket: "pi-test-bucket".to_string(),
                results_folder: "results".to_string(),
                internal_folder: "internal".to_string(),
                completion_function: "openai-proxy".to_string(),
                callback_url: DEFAULT_CALLBACK_URL.to_string(),
                rss_feed_url: TEST_FEED_URL.to_string(),
            },
            completion: ScriptedCompletion::default(),
            store: RecordingStore::default(),
            callback: RecordingCallback::default(),
            fetcher: MapFetcher::default(),
            search: FixedSearch::default(),
        }
    }

    pub fn with_completion(self, envelope: CompletionEnvelope) -> Self {
        self.completion
            .responses
            .lock()
            .expect("lock should not be poisoned")
            .push_back(envelope);
        self
    }

    pub fn with_page(mut self, url: &str, body: &[u8]) -> Self {
        self.fetcher.pages.insert(url.to_string(), body.to_vec());
        self
    }

    pub fn with_search_results(mut self, urls: &[&str]) -> Self {
        self.search.results = urls.iter().map(|url| url.to_string()).collect();
        self
    }

    pub fn with_stored_object(mut self, key: &str, body: &[u8]) -> Self {
        self.store.existing.insert(key.to_string(), body.to_vec());
        self
    }

    pub fn deps(&self) -> JobDeps<'_> {
        JobDeps {
            config: &self.config,
            completion: &self.completion,
            store: &self.store,
            callback: &self.callback,
            fetcher: &self.fetcher,
            search: &self.search,
        }
    }
}

pub fn job_event(custom_inputs: Value) -> Value {
    json!({
        "execution_id": "exec-1",
        "user_id": 11,
        "product_id": 22,
        "vendor_id": "vendor-3",
        "token": "tok",
        "custom_inputs": custom_inputs
    })
}
