use serde::{Deserialize, Serialize};

use super::base::BaseRequest;

/// Request for the `/api/generate` endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub base: BaseRequest,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<bool>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            base: BaseRequest::new(model),
            prompt: prompt.into(),
            suffix: None,
            images: None,
            system: None,
            template: None,
            context: None,
            raw: None,
        }
    }
}

/// Response from the `/api/generate` endpoint.
///
/// This structure represents a single response object. If streaming is
/// disabled, it contains the full response. If streaming is enabled, multiple
/// `GenerateResponse` objects will be received, with the final one containing
/// the performance statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct GenerateResponse {
    /// The model name used for generation.
    pub model: String,
    /// The timestamp when the response was created.
    pub created_at: String,
    /// The generated response content.
    pub response: String,
    /// Indicates if this is the final response (`true`) or part of a stream (`false`).
    pub done: bool,
    /// A reason for why the generation finished. Present only when `done` is `true`.
    #[serde(default)]
    pub done_reason: Option<String>,
    /// An encoding of the conversation context. This can be sent in the next
    /// request to maintain conversational memory.
    #[serde(default)]
    pub context: Option<Vec<i64>>,
    /// Total time spent on the request (nanoseconds).
    #[serde(default)]
    pub total_duration: Option<u64>,
    /// Time spent loading the model (nanoseconds).
    #[serde(default)]
    pub load_duration: Option<u64>,
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    /// Time spent evaluating the prompt (nanoseconds).
    #[serde(default)]
    pub prompt_eval_duration: Option<u64>,
    /// Number of tokens in the response.
    #[serde(default)]
    pub eval_count: Option<u32>,
    /// Time spent generating the response (nanoseconds).
    #[serde(default)]
    pub eval_duration: Option<u64>,
}

/// Streaming `/api/generate` chunks carry the same fields as the final object.
pub type GenerateStreamChunk = GenerateResponse;
