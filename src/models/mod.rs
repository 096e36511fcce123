pub mod base;
pub mod chat;
pub mod embed;
pub mod errors;
pub mod generate;
pub mod manage;
pub mod tool;

pub use base::{BaseRequest, FormatSpec, Message, Role};
pub use chat::{ChatRequest, ChatResponse, ChatStreamChunk};
pub use embed::{EmbedInput, EmbedRequest, EmbedResponse};
pub use errors::OllamaError;
pub use generate::{GenerateRequest, GenerateResponse, GenerateStreamChunk};
pub use manage::{
    CopyModelRequest, CreateModelRequest, DeleteModelRequest, Model, ModelDetails,
    ModelInfoRequest, ModelInfoResponse, ModelListResponse, ModelOperationStatus,
    PullModelRequest, PushModelRequest, VersionResponse,
};
pub use tool::{FunctionCall, FunctionDefinition, Tool, ToolCall, ToolType};
