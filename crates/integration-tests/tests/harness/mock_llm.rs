//! Mock engine server for integration tests
//!
//! Implements the OpenAI-compatible chat completions endpoint and records
//! every request body it receives

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Plain assistant text with full usage
    Text(String),
    /// JSON object serialized into the assistant content
    Object(serde_json::Value),
    /// Assistant text with no usage block
    TextWithoutUsage(String),
    /// Error status, optionally with a `Retry-After` header
    Status(StatusCode, Option<u64>),
}

/// Request captured by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Value of the `Authorization` header, if sent
    pub authorization: Option<String>,
    /// Parsed JSON body
    pub body: serde_json::Value,
}

/// Mock engine that returns predictable responses
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockLlmState>,
}

struct MockLlmState {
    reply: MockReply,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockLlm {
    /// Start a mock that answers with canned text
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(MockReply::Text("Hello from mock engine".to_owned())).await
    }

    /// Start a mock with a specific reply
    pub async fn start_with(reply: MockReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as an engine
    ///
    /// Includes `/v1` since the engine appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Body of the only request received
    pub fn single_request(&self) -> serde_json::Value {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].body.clone()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Wire types matching OpenAI format --

#[derive(Debug, Serialize)]
struct ChatCompletionResponse {
    id: String,
    object: String,
    created: u64,
    model: String,
    choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<Usage>,
}

#[derive(Debug, Serialize)]
struct Choice {
    index: u32,
    message: ResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Serialize)]
struct ResponseMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// -- Handlers --

async fn handle_chat_completions(
    State(state): State<Arc<MockLlmState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let model = body["model"].as_str().unwrap_or_default().to_owned();

    state.requests.lock().unwrap().push(RecordedRequest {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        body,
    });

    let (content, usage) = match &state.reply {
        MockReply::Text(text) => (text.clone(), true),
        MockReply::Object(object) => (object.to_string(), true),
        MockReply::TextWithoutUsage(text) => (text.clone(), false),
        MockReply::Status(status, retry_after) => {
            let error = Json(serde_json::json!({
                "error": {
                    "message": "mock engine intentional failure",
                    "type": "mock_error"
                }
            }));
            return match retry_after {
                Some(secs) => (*status, [(header::RETRY_AFTER, secs.to_string())], error).into_response(),
                None => (*status, error).into_response(),
            };
        }
    };

    let response = ChatCompletionResponse {
        id: "chatcmpl-test-123".to_owned(),
        object: "chat.completion".to_owned(),
        created: 1_700_000_000,
        model,
        choices: vec![Choice {
            index: 0,
            message: ResponseMessage {
                role: "assistant".to_owned(),
                content,
            },
            finish_reason: "stop".to_owned(),
        }],
        usage: usage.then_some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
    };

    Json(response).into_response()
}
