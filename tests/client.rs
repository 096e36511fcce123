use futures::StreamExt;
use httpmock::Method::{DELETE, GET, HEAD, POST};
use httpmock::MockServer;
use ollama_wire::{
    CancellationToken, ChatRequest, CopyModelRequest, DeleteModelRequest, EmbedRequest,
    GenerateRequest, Message, ModelInfoRequest, OllamaClient, OllamaError, PullModelRequest,
    Role,
};
use serde_json::json;

#[tokio::test]
async fn generate_decodes_single_object_response() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/generate")
            .json_body(json!({"model": "llama3", "prompt": "why is the sky blue?"}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "model": "llama3",
                "created_at": "2024-08-04T19:22:45.499127Z",
                "response": "Rayleigh scattering.",
                "done": true,
                "total_duration": 5043500667u64,
                "eval_count": 290
            }));
    });

    let client = OllamaClient::new(server.base_url());
    let response = client
        .generate(GenerateRequest::new("llama3", "why is the sky blue?"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.response, "Rayleigh scattering.");
    assert!(response.done);
    assert_eq!(response.eval_count, Some(290));
}

#[tokio::test]
async fn chat_round_trips_role_and_content() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/chat")
            .json_body(json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": "hi"}]
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "model": "llama3",
                "created_at": "2024-07-22T20:33:28.123648Z",
                "message": {"role": "user", "content": "hi"},
                "done": true,
                "done_reason": "stop"
            }));
    });

    let client = OllamaClient::new(server.base_url());
    let response = client
        .chat(ChatRequest::new("llama3", vec![Message::user("hi")]))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.message.role, Role::User);
    assert_eq!(response.message.content.as_deref(), Some("hi"));
}

#[tokio::test]
async fn pull_collects_ndjson_statuses_skipping_blank_lines() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/pull");
        then.status(200)
            .header("content-type", "application/x-ndjson")
            .body("{\"status\":\"pulling manifest\"}\n\n{\"status\":\"success\"}\n");
    });

    let client = OllamaClient::new(server.base_url());
    let cancel = CancellationToken::new();
    let statuses = client
        .pull_model(PullModelRequest::new("llama3"), &cancel)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].status, "pulling manifest");
    assert_eq!(statuses[1].status, "success");
}

#[tokio::test]
async fn pull_stream_yields_statuses_lazily() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/pull");
        then.status(200).body(
            "{\"status\":\"downloading\",\"digest\":\"sha256:abc\",\"total\":100,\"completed\":10}\n\
             {\"status\":\"success\"}\n",
        );
    });

    let client = OllamaClient::new(server.base_url());
    let stream = client
        .pull_model_stream(PullModelRequest::new("llama3"))
        .await
        .unwrap();
    let statuses: Vec<_> = stream.collect().await;

    assert_eq!(statuses.len(), 2);
    let first = statuses[0].as_ref().unwrap();
    assert_eq!(first.digest.as_deref(), Some("sha256:abc"));
    assert_eq!(first.completed, Some(10));
}

#[tokio::test]
async fn pull_with_empty_body_yields_no_statuses() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/pull");
        then.status(200).body("");
    });

    let client = OllamaClient::new(server.base_url());
    let cancel = CancellationToken::new();
    let statuses = client
        .pull_model(PullModelRequest::new("llama3"), &cancel)
        .await
        .unwrap();
    assert!(statuses.is_empty());
}

#[tokio::test]
async fn malformed_ndjson_line_fails_the_call() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/pull");
        then.status(200)
            .body("{\"status\":\"a\"}\nthis is not json\n");
    });

    let client = OllamaClient::new(server.base_url());
    let cancel = CancellationToken::new();
    let result = client
        .pull_model(PullModelRequest::new("llama3"), &cancel)
        .await;
    assert!(matches!(result, Err(OllamaError::Decode(_))));
}

#[tokio::test]
async fn blob_check_maps_status_to_bool() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(HEAD).path("/api/blobs/sha256:feed");
        then.status(200);
    });
    server.mock(|when, then| {
        when.method(HEAD).path("/api/blobs/sha256:dead");
        then.status(404);
    });

    let client = OllamaClient::new(server.base_url());
    assert!(client.check_blob_exists("sha256:feed").await.unwrap());
    assert!(!client.check_blob_exists("sha256:dead").await.unwrap());
}

#[tokio::test]
async fn push_blob_uploads_raw_bytes() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/blobs/sha256:cafe")
            .body("raw model weights");
        then.status(201);
    });

    let client = OllamaClient::new(server.base_url());
    client
        .push_blob("sha256:cafe", "raw model weights".as_bytes().to_vec())
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn delete_sends_json_body_on_delete_verb() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/delete")
            .json_body(json!({"model": "x"}));
        then.status(200);
    });

    let client = OllamaClient::new(server.base_url());
    client.delete_model(DeleteModelRequest::new("x")).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn copy_model_posts_source_and_destination() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/copy")
            .json_body(json!({"source": "llama3", "destination": "llama3-backup"}));
        then.status(200);
    });

    let client = OllamaClient::new(server.base_url());
    client
        .copy_model(CopyModelRequest {
            source: "llama3".into(),
            destination: "llama3-backup".into(),
        })
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn embed_accepts_single_and_batch_inputs() {
    let server = MockServer::start_async().await;
    let single = server.mock(|when, then| {
        when.method(POST)
            .path("/api/embed")
            .json_body(json!({"model": "all-minilm", "input": "hello"}));
        then.status(200)
            .json_body(json!({"model": "all-minilm", "embeddings": [[0.1, 0.2]]}));
    });
    let batch = server.mock(|when, then| {
        when.method(POST)
            .path("/api/embed")
            .json_body(json!({"model": "all-minilm", "input": ["a", "b"]}));
        then.status(200)
            .json_body(json!({"model": "all-minilm", "embeddings": [[0.1], [0.2]]}));
    });

    let client = OllamaClient::new(server.base_url());

    let one = client
        .embed(EmbedRequest::new("all-minilm", "hello"))
        .await
        .unwrap();
    assert_eq!(one.embeddings.len(), 1);

    let two = client
        .embed(EmbedRequest::new(
            "all-minilm",
            vec!["a".to_string(), "b".to_string()],
        ))
        .await
        .unwrap();
    assert_eq!(two.embeddings.len(), 2);

    single.assert();
    batch.assert();
}

#[tokio::test]
async fn list_and_show_and_version_decode() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/tags");
        then.status(200).json_body(json!({
            "models": [{"name": "llama3:latest", "size": 3825819519u64, "digest": "fe938a131f40"}]
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/ps");
        then.status(200).json_body(json!({
            "models": [{
                "name": "mistral:latest",
                "size": 5137025024u64,
                "digest": "2ae6f6dd7a3d",
                "expires_at": "2024-06-04T14:38:31.83753-07:00",
                "size_vram": 5137025024u64
            }]
        }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/show")
            .json_body(json!({"model": "llama3"}));
        then.status(200).json_body(json!({
            "modelfile": "# Modelfile ...",
            "details": {"family": "llama", "quantization_level": "Q4_0"}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/version");
        then.status(200).json_body(json!({"version": "0.5.1"}));
    });

    let client = OllamaClient::new(server.base_url());

    let tags = client.list_local_models().await.unwrap();
    assert_eq!(tags.models[0].name, "llama3:latest");

    let running = client.list_running_models().await.unwrap();
    assert_eq!(running.models[0].size_vram, Some(5_137_025_024));

    let info = client.show_model(ModelInfoRequest::new("llama3")).await.unwrap();
    assert_eq!(
        info.details.unwrap().quantization_level.as_deref(),
        Some("Q4_0")
    );

    let version = client.version().await.unwrap();
    assert_eq!(version.version, "0.5.1");
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(500).body("model failed to load");
    });

    let client = OllamaClient::new(server.base_url());
    let result = client
        .generate(GenerateRequest::new("llama3", "hi"))
        .await;

    match result {
        Err(OllamaError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "model failed to load");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_single_object_response_fails_decode() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(200).body("not json at all");
    });

    let client = OllamaClient::new(server.base_url());
    let result = client
        .generate(GenerateRequest::new("llama3", "hi"))
        .await;
    assert!(matches!(result, Err(OllamaError::Decode(_))));
}

#[tokio::test]
async fn blocking_client_mirrors_async_calls() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/version");
        then.status(200).json_body(json!({"version": "0.5.1"}));
    });

    let base_url = server.base_url();
    // block_on is not allowed inside the test runtime
    let version = tokio::task::spawn_blocking(move || {
        let client = ollama_wire::blocking::OllamaBlockingClient::new(base_url).unwrap();
        client.version()
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(version.version, "0.5.1");
}
