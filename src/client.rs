use async_stream::try_stream;
use futures::{Stream, StreamExt};
use reqwest::{Client, Error as ReqwestError, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info_span, instrument, trace, Instrument};

use crate::models::{
    chat::{ChatRequest, ChatResponse, ChatStreamChunk},
    embed::{EmbedRequest, EmbedResponse},
    errors::OllamaError,
    generate::{GenerateRequest, GenerateResponse, GenerateStreamChunk},
    manage::{
        CopyModelRequest, CreateModelRequest, DeleteModelRequest, ModelInfoRequest,
        ModelInfoResponse, ModelListResponse, ModelOperationStatus, PullModelRequest,
        PushModelRequest, VersionResponse,
    },
};

/// Default address of a locally running server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The main client for interacting with the Ollama API.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    pub http: Client,
    pub base_url: String,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OllamaClient {
    /// Creates a new `OllamaClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the Ollama API (e.g., "http://localhost:11434").
    pub fn new(base_url: impl Into<String>) -> Self {
        OllamaClient {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fails the call with the response status and body unless the status is
    /// in the success range.
    async fn ensure_success(response: Response) -> Result<Response, OllamaError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".into());

        error!(%status, body = %body, "request failed");

        Err(OllamaError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Decodes the whole response body as one JSON document.
    async fn decode<R>(response: Response) -> Result<R, OllamaError>
    where
        R: DeserializeOwned + fmt::Debug,
    {
        let response_text = response
            .text()
            .await
            .map_err(|e| OllamaError::Request(format!("Failed to read response text: {e}")))?;

        match serde_json::from_str::<R>(&response_text) {
            Ok(parsed) => {
                trace!(?parsed, "deserialized response");
                Ok(parsed)
            }
            Err(e) => {
                error!(%e, raw = %response_text, "deserialization error");
                Err(OllamaError::Decode(format!(
                    "Error decoding response body: {e}. Raw JSON was: '{response_text}'"
                )))
            }
        }
    }

    /// Executes a POST request against the given endpoint and decodes the
    /// response as a single JSON object.
    #[instrument(name = "ollama.post", skip_all, fields(endpoint))]
    async fn post<T, R>(&self, endpoint: &str, request_body: &T) -> Result<R, OllamaError>
    where
        T: serde::Serialize + fmt::Debug,
        R: DeserializeOwned + fmt::Debug,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let span = info_span!("http.request", %url);
        async {
            let response = self
                .http
                .post(&url)
                .json(request_body)
                .send()
                .await
                .map_err(|e| OllamaError::Request(e.to_string()))?;

            debug!(status = %response.status(), "received response");

            let response = Self::ensure_success(response).await?;
            Self::decode(response).await
        }
        .instrument(span)
        .await
    }

    /// Executes a POST request whose response carries no body worth decoding.
    #[instrument(name = "ollama.post_unit", skip_all, fields(endpoint))]
    async fn post_unit<T>(&self, endpoint: &str, request_body: &T) -> Result<(), OllamaError>
    where
        T: serde::Serialize + fmt::Debug,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .post(&url)
            .json(request_body)
            .send()
            .await
            .map_err(|e| OllamaError::Request(e.to_string()))?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Executes a GET request and decodes the response as a single JSON
    /// object.
    #[instrument(name = "ollama.get", skip_all, fields(endpoint))]
    async fn get<R>(&self, endpoint: &str) -> Result<R, OllamaError>
    where
        R: DeserializeOwned + fmt::Debug,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| OllamaError::Request(e.to_string()))?;

        debug!(status = %response.status(), "received response");

        let response = Self::ensure_success(response).await?;
        Self::decode(response).await
    }

    /// Executes a POST request and decodes the NDJSON response lazily.
    ///
    /// Each `\n`-terminated line of the body is an independent JSON document;
    /// empty lines are skipped. A malformed line fails the stream at that
    /// point.
    #[instrument(name = "ollama.post_stream", skip_all, fields(endpoint))]
    async fn post_stream<T, R>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<impl Stream<Item = Result<R, OllamaError>> + Send + 'static, OllamaError>
    where
        T: serde::Serialize + fmt::Debug,
        R: DeserializeOwned + fmt::Debug + Send + 'static,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| OllamaError::Request(e.to_string()))?;

        let response = Self::ensure_success(response).await?;
        let byte_stream = response.bytes_stream();

        Ok(try_stream! {
            let mut buf = Vec::<u8>::new();
            tokio::pin!(byte_stream);

            while let Some(chunk) = byte_stream.next().await {
                let chunk = chunk.map_err(|e| OllamaError::Request(e.to_string()))?;
                buf.extend_from_slice(&chunk);

                // split on line feed – the server sends \n-terminated JSON lines
                while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    let line = &line[..line.len() - 1]; // trim line feed

                    if line.is_empty() {
                        continue;
                    }

                    let parsed: R = serde_json::from_slice(line)
                        .map_err(|e| OllamaError::Decode(e.to_string()))?;

                    yield parsed;
                }
            }

            // a final document may arrive without a trailing line feed
            if !buf.is_empty() {
                let parsed: R = serde_json::from_slice(&buf)
                    .map_err(|e| OllamaError::Decode(e.to_string()))?;
                yield parsed;
            }
        })
    }

    /// Generates a completion for a prompt. Corresponds to `POST /api/generate`.
    pub async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, OllamaError> {
        self.post("/api/generate", &request).await
    }

    /// Streams a completion chunk by chunk instead of waiting for the full
    /// response.
    pub async fn generate_stream(
        &self,
        request: GenerateRequest,
    ) -> Result<
        impl Stream<Item = Result<GenerateStreamChunk, OllamaError>> + Send + 'static,
        OllamaError,
    > {
        self.post_stream("/api/generate", &request).await
    }

    /// Sends a chat request. Corresponds to `POST /api/chat`.
    ///
    /// # Arguments
    ///
    /// * `request` - The `ChatRequest` containing the model, messages, tools, and options.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, OllamaError> {
        self.post("/api/chat", &request).await
    }

    /// Streams a chat reply chunk by chunk.
    pub async fn chat_stream(
        &self,
        request: ChatRequest,
    ) -> Result<impl Stream<Item = Result<ChatStreamChunk, OllamaError>> + Send + 'static, OllamaError>
    {
        self.post_stream("/api/chat", &request).await
    }

    /// Creates a model. Corresponds to `POST /api/create`.
    ///
    /// The server reports progress as a sequence of status objects; they are
    /// collected and returned once the operation finishes. Cancelling the
    /// token stops reading and returns the statuses seen so far.
    pub async fn create_model(
        &self,
        request: CreateModelRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ModelOperationStatus>, OllamaError> {
        let stream = self.post_stream("/api/create", &request).await?;
        collect_until_cancelled(stream, cancel).await
    }

    /// Lower-level variant of [`create_model`](Self::create_model) yielding
    /// each status as it arrives.
    pub async fn create_model_stream(
        &self,
        request: CreateModelRequest,
    ) -> Result<
        impl Stream<Item = Result<ModelOperationStatus, OllamaError>> + Send + 'static,
        OllamaError,
    > {
        self.post_stream("/api/create", &request).await
    }

    /// Checks whether a blob with the given digest exists on the server.
    /// Corresponds to `HEAD /api/blobs/{digest}`.
    ///
    /// A 404 is an expected answer here, so any non-success status maps to
    /// `false` rather than an error.
    pub async fn check_blob_exists(&self, digest: &str) -> Result<bool, OllamaError> {
        let url = format!("{}/api/blobs/{digest}", self.base_url);
        let response = self
            .http
            .head(&url)
            .send()
            .await
            .map_err(|e| OllamaError::Request(e.to_string()))?;

        debug!(status = %response.status(), %digest, "blob existence check");
        Ok(response.status().is_success())
    }

    /// Uploads a blob under the given digest. Corresponds to
    /// `POST /api/blobs/{digest}` with the raw bytes as the body.
    pub async fn push_blob(
        &self,
        digest: &str,
        data: impl Into<reqwest::Body>,
    ) -> Result<(), OllamaError> {
        let url = format!("{}/api/blobs/{digest}", self.base_url);
        let response = self
            .http
            .post(&url)
            .body(data)
            .send()
            .await
            .map_err(|e| OllamaError::Request(e.to_string()))?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Lists models stored locally. Corresponds to `GET /api/tags`.
    pub async fn list_local_models(&self) -> Result<ModelListResponse, OllamaError> {
        self.get("/api/tags").await
    }

    /// Shows details for one model. Corresponds to `POST /api/show`.
    pub async fn show_model(
        &self,
        request: ModelInfoRequest,
    ) -> Result<ModelInfoResponse, OllamaError> {
        self.post("/api/show", &request).await
    }

    /// Copies a model under a new name. Corresponds to `POST /api/copy`.
    pub async fn copy_model(&self, request: CopyModelRequest) -> Result<(), OllamaError> {
        self.post_unit("/api/copy", &request).await
    }

    /// Deletes a model. Corresponds to `DELETE /api/delete`.
    ///
    /// The server expects the model name in a JSON body on the DELETE verb
    /// itself.
    pub async fn delete_model(&self, request: DeleteModelRequest) -> Result<(), OllamaError> {
        let url = format!("{}/api/delete", self.base_url);
        let response = self
            .http
            .delete(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OllamaError::Request(e.to_string()))?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Pulls a model from the registry. Corresponds to `POST /api/pull`.
    ///
    /// Progress statuses are collected until the operation finishes or the
    /// token is cancelled, in which case the partial sequence is returned.
    pub async fn pull_model(
        &self,
        request: PullModelRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ModelOperationStatus>, OllamaError> {
        let stream = self.post_stream("/api/pull", &request).await?;
        collect_until_cancelled(stream, cancel).await
    }

    /// Lower-level variant of [`pull_model`](Self::pull_model) yielding each
    /// status as it arrives.
    pub async fn pull_model_stream(
        &self,
        request: PullModelRequest,
    ) -> Result<
        impl Stream<Item = Result<ModelOperationStatus, OllamaError>> + Send + 'static,
        OllamaError,
    > {
        self.post_stream("/api/pull", &request).await
    }

    /// Pushes a model to the registry. Corresponds to `POST /api/push`.
    pub async fn push_model(
        &self,
        request: PushModelRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<ModelOperationStatus>, OllamaError> {
        let stream = self.post_stream("/api/push", &request).await?;
        collect_until_cancelled(stream, cancel).await
    }

    /// Lower-level variant of [`push_model`](Self::push_model) yielding each
    /// status as it arrives.
    pub async fn push_model_stream(
        &self,
        request: PushModelRequest,
    ) -> Result<
        impl Stream<Item = Result<ModelOperationStatus, OllamaError>> + Send + 'static,
        OllamaError,
    > {
        self.post_stream("/api/push", &request).await
    }

    /// Generates embeddings for one or more inputs. Corresponds to
    /// `POST /api/embed`.
    pub async fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse, OllamaError> {
        self.post("/api/embed", &request).await
    }

    /// Lists models currently loaded into memory. Corresponds to
    /// `GET /api/ps`.
    pub async fn list_running_models(&self) -> Result<ModelListResponse, OllamaError> {
        self.get("/api/ps").await
    }

    /// Returns the server version. Corresponds to `GET /api/version`.
    pub async fn version(&self) -> Result<VersionResponse, OllamaError> {
        self.get("/api/version").await
    }
}

/// Drains a status stream into a vector. When the token fires mid-stream,
/// reading stops and the items accumulated so far are returned as-is.
async fn collect_until_cancelled<S, R>(
    stream: S,
    cancel: &CancellationToken,
) -> Result<Vec<R>, OllamaError>
where
    S: Stream<Item = Result<R, OllamaError>>,
{
    tokio::pin!(stream);
    let mut items = Vec::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            next = stream.next() => match next {
                Some(item) => items.push(item?),
                None => break,
            },
        }
    }

    Ok(items)
}

impl From<ReqwestError> for OllamaError {
    fn from(err: ReqwestError) -> Self {
        OllamaError::Request(err.to_string())
    }
}
