//! Synchronous facade over [`OllamaClient`].
//!
//! Every method blocks the calling thread on the corresponding async call;
//! there is no independent logic here. Must not be used from inside an async
//! runtime.

use tokio::runtime::{Builder, Runtime};
use tokio_util::sync::CancellationToken;

use crate::client::{OllamaClient, DEFAULT_BASE_URL};
use crate::models::{
    chat::{ChatRequest, ChatResponse},
    embed::{EmbedRequest, EmbedResponse},
    errors::OllamaError,
    generate::{GenerateRequest, GenerateResponse},
    manage::{
        CopyModelRequest, CreateModelRequest, DeleteModelRequest, ModelInfoRequest,
        ModelInfoResponse, ModelListResponse, ModelOperationStatus, PullModelRequest,
        PushModelRequest, VersionResponse,
    },
};

#[derive(Debug)]
pub struct OllamaBlockingClient {
    runtime: Runtime,
    inner: OllamaClient,
}

impl OllamaBlockingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, OllamaError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| OllamaError::Request(format!("Failed to start runtime: {e}")))?;

        Ok(Self {
            runtime,
            inner: OllamaClient::new(base_url),
        })
    }

    pub fn default_local() -> Result<Self, OllamaError> {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, OllamaError> {
        self.runtime.block_on(self.inner.generate(request))
    }

    pub fn chat(&self, request: ChatRequest) -> Result<ChatResponse, OllamaError> {
        self.runtime.block_on(self.inner.chat(request))
    }

    pub fn create_model(
        &self,
        request: CreateModelRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ModelOperationStatus>, OllamaError> {
        self.runtime.block_on(self.inner.create_model(request, cancel))
    }

    pub fn check_blob_exists(&self, digest: &str) -> Result<bool, OllamaError> {
        self.runtime.block_on(self.inner.check_blob_exists(digest))
    }

    pub fn push_blob(
        &self,
        digest: &str,
        data: impl Into<reqwest::Body>,
    ) -> Result<(), OllamaError> {
        self.runtime.block_on(self.inner.push_blob(digest, data))
    }

    pub fn list_local_models(&self) -> Result<ModelListResponse, OllamaError> {
        self.runtime.block_on(self.inner.list_local_models())
    }

    pub fn show_model(&self, request: ModelInfoRequest) -> Result<ModelInfoResponse, OllamaError> {
        self.runtime.block_on(self.inner.show_model(request))
    }

    pub fn copy_model(&self, request: CopyModelRequest) -> Result<(), OllamaError> {
        self.runtime.block_on(self.inner.copy_model(request))
    }

    pub fn delete_model(&self, request: DeleteModelRequest) -> Result<(), OllamaError> {
        self.runtime.block_on(self.inner.delete_model(request))
    }

    pub fn pull_model(
        &self,
        request: PullModelRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ModelOperationStatus>, OllamaError> {
        self.runtime.block_on(self.inner.pull_model(request, cancel))
    }

    pub fn push_model(
        &self,
        request: PushModelRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ModelOperationStatus>, OllamaError> {
        self.runtime.block_on(self.inner.push_model(request, cancel))
    }

    pub fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse, OllamaError> {
        self.runtime.block_on(self.inner.embed(request))
    }

    pub fn list_running_models(&self) -> Result<ModelListResponse, OllamaError> {
        self.runtime.block_on(self.inner.list_running_models())
    }

    pub fn version(&self) -> Result<VersionResponse, OllamaError> {
        self.runtime.block_on(self.inner.version())
    }
}
