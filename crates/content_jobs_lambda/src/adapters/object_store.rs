use crate::error::PipelineError;

pub trait ArtifactStore {
    fn write_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), PipelineError>;
    fn read_object(&self, key: &str) -> Result<Vec<u8>, PipelineError>;
}

/// A finished result file, named relative to the execution folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            body,
        }
    }
}
