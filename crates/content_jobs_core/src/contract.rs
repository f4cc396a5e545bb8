use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Invalid input: one or more required fields are missing.";

/// Trigger payload shared by every content job.
///
/// Identifier fields default when absent so that validating variants can tell
/// "missing" apart from "malformed"; a value of the wrong JSON type is still a
/// deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRequest<I> {
    #[serde(default)]
    pub execution_id: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub custom_inputs: I,
}

impl<I> JobRequest<I> {
    /// Rejects empty or zero identifiers.
    pub fn validate_identity(&self) -> Result<(), ValidationError> {
        if self.execution_id.trim().is_empty()
            || self.user_id == 0
            || self.product_id == 0
            || self.token.trim().is_empty()
        {
            return Err(ValidationError::new(MISSING_FIELDS_MESSAGE));
        }
        Ok(())
    }

    pub fn completion_request(
        &self,
        prompt: impl Into<String>,
        service: impl Into<String>,
        size: impl Into<String>,
    ) -> CompletionRequest {
        CompletionRequest {
            user_id: self.user_id,
            product_id: self.product_id,
            execution_id: self.execution_id.clone(),
            prompt: Some(prompt.into()),
            input: None,
            vendor_id: None,
            service: service.into(),
            size: size.into(),
        }
    }

    pub fn speech_request(
        &self,
        input: impl Into<String>,
        service: impl Into<String>,
        size: impl Into<String>,
    ) -> CompletionRequest {
        CompletionRequest {
            user_id: self.user_id,
            product_id: self.product_id,
            execution_id: self.execution_id.clone(),
            prompt: None,
            input: Some(input.into()),
            vendor_id: Some(self.vendor_id.clone()),
            service: service.into(),
            size: size.into(),
        }
    }

    pub fn status_report(&self, status: ReportStatus, results: impl Into<String>) -> StatusReport {
        StatusReport {
            execution_id: self.execution_id.clone(),
            user_id: self.user_id,
            product_id: self.product_id,
            token: self.token.clone(),
            status,
            results: results.into(),
        }
    }
}

/// Accepts strings, numbers and booleans for free-form custom inputs.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub execution_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    pub service: String,
    pub size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionEnvelope {
    pub status_code: i64,
    #[serde(default)]
    pub body: Value,
}

impl CompletionEnvelope {
    pub fn ok(body: Value) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    /// Returns the decoded body of a 200 envelope.
    ///
    /// Some backends return the body as a JSON-encoded string; it is decoded
    /// transparently.
    pub fn success_body(&self) -> Result<Value, ContentError> {
        if self.status_code != 200 {
            return Err(ContentError::BackendStatus {
                status_code: self.status_code,
                body: self.body.to_string(),
            });
        }

        match &self.body {
            Value::String(text) => Ok(serde_json::from_str(text).unwrap_or_else(|_| self.body.clone())),
            other => Ok(other.clone()),
        }
    }

    /// `choices[0].message.content`
    pub fn chat_content(&self) -> Result<String, ContentError> {
        let body = self.success_body()?;
        body.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ContentError::MissingField {
                field: "choices[0].message.content",
                body: body.to_string(),
            })
    }

    /// `data[0].url`
    pub fn image_url(&self) -> Result<String, ContentError> {
        let body = self.success_body()?;
        body.pointer("/data/0/url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ContentError::MissingField {
                field: "data[0].url",
                body: body.to_string(),
            })
    }

    /// `file_name` of an object staged by the speech service.
    pub fn file_name(&self) -> Result<String, ContentError> {
        let body = self.success_body()?;
        body.get("file_name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ContentError::MissingField {
                field: "file_name",
                body: body.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Successful,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusReport {
    pub execution_id: String,
    pub user_id: i64,
    pub product_id: i64,
    pub token: String,
    pub status: ReportStatus,
    pub results: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl JobResponse {
    pub fn new(status_code: u16, payload: Value) -> Self {
        Self {
            status_code,
            body: payload.to_string(),
        }
    }

    pub fn success(payload: Value) -> Self {
        Self::new(200, payload)
    }

    pub fn client_error(message: &str) -> Self {
        Self::new(400, json!({ "message": message }))
    }

    pub fn failure(message: &str, error: &str) -> Self {
        Self::new(500, json!({ "message": message, "error": error }))
    }

    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("completion backend returned status code {status_code}. Error: {body}")]
    BackendStatus { status_code: i64, body: String },

    #[error("completion response is missing {field}: {body}")]
    MissingField { field: &'static str, body: String },
}

/// Unwraps API Gateway style events whose `body` carries the job payload.
pub fn normalize_event(event: Value) -> Result<Value, ValidationError> {
    let Some(object) = event.as_object() else {
        return Err(ValidationError::new("Request payload must be a JSON object"));
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => serde_json::from_str::<Value>(text)
            .map_err(|error| ValidationError::new(format!("Malformed JSON body: {error}")))
            .and_then(|parsed| {
                if parsed.is_object() {
                    Ok(parsed)
                } else {
                    Err(ValidationError::new("Request body must be a JSON object"))
                }
            }),
        _ => Err(ValidationError::new("Request body must be a JSON object")),
    }
}

pub fn parse_job_request<I>(event: Value) -> Result<JobRequest<I>, ValidationError>
where
    I: DeserializeOwned + Default,
{
    let payload = normalize_event(event)?;
    serde_json::from_value(payload)
        .map_err(|error| ValidationError::new(format!("Malformed request: {error}")))
}
