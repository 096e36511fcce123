//! Typed async client for the Ollama HTTP API.
//!
//! Wraps every endpoint of a locally running server in a typed
//! request/response pair: generation, chat, embeddings, model management
//! (create/pull/push/copy/delete/list) and blob upload. Single-object
//! responses are decoded in one piece; long-running operations stream
//! newline-delimited JSON status objects, exposed both as a buffered list
//! and as a lazy [`futures::Stream`].
//!
//! ```no_run
//! use ollama_wire::{ChatRequest, Message, OllamaClient};
//!
//! # async fn run() -> Result<(), ollama_wire::OllamaError> {
//! let client = OllamaClient::default();
//! let response = client
//!     .chat(ChatRequest::new("llama3", vec![Message::user("hi")]))
//!     .await?;
//! println!("{:?}", response.message.content);
//! # Ok(())
//! # }
//! ```

pub mod blocking;
mod client;
pub mod logging;
pub mod models;

pub use client::{OllamaClient, DEFAULT_BASE_URL};
pub use logging::init_default_tracing;
pub use models::{
    BaseRequest, ChatRequest, ChatResponse, ChatStreamChunk, CopyModelRequest,
    CreateModelRequest, DeleteModelRequest, EmbedInput, EmbedRequest, EmbedResponse,
    FormatSpec, FunctionCall, FunctionDefinition, GenerateRequest, GenerateResponse,
    GenerateStreamChunk, Message, Model, ModelDetails, ModelInfoRequest, ModelInfoResponse,
    ModelListResponse, ModelOperationStatus, OllamaError, PullModelRequest, PushModelRequest,
    Role, Tool, ToolCall, ToolType, VersionResponse,
};
pub use tokio_util::sync::CancellationToken;
