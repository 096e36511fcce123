use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::Message;

/// Request for the `/api/create` endpoint.
///
/// `files` and `adapters` map file names to blob digests previously uploaded
/// via the blobs endpoint.
#[derive(Serialize, Debug, Clone, Default)]
pub struct CreateModelRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapters: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    // a single license string or a list of them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantize: Option<String>,
}

/// Request for the `/api/show` endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct ModelInfoRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl ModelInfoRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            verbose: None,
        }
    }
}

/// Response from the `/api/show` endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct ModelInfoResponse {
    #[serde(default)]
    pub modelfile: Option<String>,
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub details: Option<ModelDetails>,
    #[serde(default)]
    pub model_info: Option<HashMap<String, Value>>,
}

/// Request for the `/api/copy` endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct CopyModelRequest {
    pub source: String,
    pub destination: String,
}

/// Request for the `/api/delete` endpoint. Sent as the body of a DELETE.
#[derive(Serialize, Debug, Clone)]
pub struct DeleteModelRequest {
    pub model: String,
}

impl DeleteModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

/// Request for the `/api/pull` endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct PullModelRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl PullModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            insecure: None,
            stream: None,
        }
    }
}

/// Request for the `/api/push` endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct PushModelRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl PushModelRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            insecure: None,
            stream: None,
        }
    }
}

/// A locally stored model (`/api/tags`) or a currently loaded one
/// (`/api/ps`). `expires_at` and `size_vram` are only populated by the
/// latter.
#[derive(Deserialize, Debug, Clone)]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub digest: String,
    #[serde(default)]
    pub details: Option<ModelDetails>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub size_vram: Option<u64>,
}

/// Architecture metadata for a model.
#[derive(Deserialize, Debug, Clone)]
pub struct ModelDetails {
    #[serde(default)]
    pub parent_model: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub families: Option<Vec<String>>,
    #[serde(default)]
    pub parameter_size: Option<String>,
    #[serde(default)]
    pub quantization_level: Option<String>,
}

/// Response from the `/api/tags` and `/api/ps` endpoints.
#[derive(Deserialize, Debug, Clone)]
pub struct ModelListResponse {
    pub models: Vec<Model>,
}

/// One step of a long-running create/pull/push operation. The server emits
/// many of these over the lifetime of a single request; `digest`, `total`
/// and `completed` only appear on layer-transfer steps.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelOperationStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<u64>,
}

/// Response from the `/api/version` endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct VersionResponse {
    pub version: String,
}
