use content_jobs_core::contract::StatusReport;

use crate::error::PipelineError;

pub trait StatusCallback {
    fn send(&self, report: &StatusReport) -> Result<(), PipelineError>;
}
