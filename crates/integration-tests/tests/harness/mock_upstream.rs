//! Mock upstream for integration tests
//!
//! One axum server playing all three hosted services: OpenAI-compatible chat
//! completions, streamed speech synthesis, and Whisper-style audio upload.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use futures_util::stream;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Audio chunks the speech endpoint streams, in order
pub const SPEECH_CHUNKS: [&[u8]; 3] = [b"ID3\x04", b"\x00\x00mock-", b"mp3-frames"];

/// Transcript returned by the audio endpoints
pub const TRANSCRIPT: &str = "What is the weather like today?";

/// Reply returned by the chat endpoint unless overridden
pub const REPLY: &str = "It is sunny with a light breeze.";

/// Which endpoint should answer with an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    Chat,
    Speech,
    Audio,
    EmptySpeech,
}

/// What an audio upload carried
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub endpoint: String,
    pub model: Option<String>,
    pub response_format: Option<String>,
    pub temperature: Option<String>,
    pub filename: Option<String>,
    pub file: Vec<u8>,
}

/// Mock upstream server
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    completion_count: AtomicU32,
    speech_count: AtomicU32,
    audio_count: AtomicU32,
    failure: Failure,
    reply: String,
    last_messages: Mutex<Vec<ChatMessage>>,
    last_speech: Mutex<Option<SpeechRequest>>,
    last_upload: Mutex<Option<Upload>>,
}

impl MockUpstream {
    /// Start a mock upstream where every endpoint succeeds
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Failure::None, REPLY).await
    }

    /// Start a mock upstream where one endpoint fails
    pub async fn start_failing(failure: Failure) -> anyhow::Result<Self> {
        Self::start_inner(failure, REPLY).await
    }

    /// Start a mock upstream with a custom chat reply
    pub async fn start_with_reply(reply: &str) -> anyhow::Result<Self> {
        Self::start_inner(Failure::None, reply).await
    }

    async fn start_inner(failure: Failure, reply: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            completion_count: AtomicU32::new(0),
            speech_count: AtomicU32::new(0),
            audio_count: AtomicU32::new(0),
            failure,
            reply: reply.to_owned(),
            last_messages: Mutex::new(Vec::new()),
            last_speech: Mutex::new(None),
            last_upload: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/v1/audio/speech", routing::post(handle_speech))
            .route("/v1/audio/translations", routing::post(handle_translations))
            .route("/v1/audio/transcriptions", routing::post(handle_transcriptions))
            .layer(DefaultBodyLimit::disable())
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

    /// Base URL for all three upstream configurations
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    pub fn speech_count(&self) -> u32 {
        self.state.speech_count.load(Ordering::Relaxed)
    }

    pub fn audio_count(&self) -> u32 {
        self.state.audio_count.load(Ordering::Relaxed)
    }

    /// `(role, content)` pairs of the last chat request
    pub fn last_messages(&self) -> Vec<(String, String)> {
        self.state
            .last_messages
            .lock()
            .unwrap()
            .iter()
            .map(|m| (m.role.clone(), m.content.clone()))
            .collect()
    }

    /// Input text and voice of the last speech request
    pub fn last_speech(&self) -> Option<(String, String)> {
        self.state
            .last_speech
            .lock()
            .unwrap()
            .as_ref()
            .map(|s| (s.input.clone(), s.voice.clone()))
    }

    pub fn last_upload(&self) -> Option<Upload> {
        self.state.last_upload.lock().unwrap().clone()
    }

    /// Every speech chunk joined, as the client should reassemble it
    pub fn speech_bytes() -> Vec<u8> {
        SPEECH_CHUNKS.concat()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Wire types --

#[derive(Debug, Clone, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionResponse {
    id: String,
    object: String,
    created: u64,
    model: String,
    choices: Vec<Choice>,
    usage: Usage,
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

#[derive(Debug, Clone, Deserialize)]
struct SpeechRequest {
    model: String,
    input: String,
    voice: String,
    #[serde(default)]
    response_format: Option<String>,
}

// -- Handlers --

fn upstream_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": {
                "message": message,
                "type": "server_error"
            }
        })),
    )
        .into_response()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    Json(req): Json<ChatCompletionRequest>,
) -> Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    *state.last_messages.lock().unwrap() = req.messages;

    if state.failure == Failure::Chat {
        return upstream_error(StatusCode::INTERNAL_SERVER_ERROR, "mock chat failure");
    }

    let response = ChatCompletionResponse {
        id: "chatcmpl-test-123".to_owned(),
        object: "chat.completion".to_owned(),
        created: 1_700_000_000,
        model: req.model,
        choices: vec![Choice {
            index: 0,
            message: ResponseMessage {
                role: "assistant".to_owned(),
                content: state.reply.clone(),
            },
            finish_reason: "stop".to_owned(),
        }],
        usage: Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        },
    };

    Json(response).into_response()
}

async fn handle_speech(State(state): State<Arc<MockState>>, Json(req): Json<SpeechRequest>) -> Response {
    state.speech_count.fetch_add(1, Ordering::Relaxed);
    *state.last_speech.lock().unwrap() = Some(req);

    match state.failure {
        Failure::Speech => return upstream_error(StatusCode::SERVICE_UNAVAILABLE, "mock speech failure"),
        Failure::EmptySpeech => return (StatusCode::OK, [(header::CONTENT_TYPE, "audio/mpeg")]).into_response(),
        _ => {}
    }

    let chunks = SPEECH_CHUNKS.map(|chunk| Ok::<_, Infallible>(Bytes::from_static(chunk)));

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        Body::from_stream(stream::iter(chunks)),
    )
        .into_response()
}

async fn handle_translations(State(state): State<Arc<MockState>>, multipart: Multipart) -> Response {
    handle_audio(&state, "translations", multipart).await
}

async fn handle_transcriptions(State(state): State<Arc<MockState>>, multipart: Multipart) -> Response {
    handle_audio(&state, "transcriptions", multipart).await
}

async fn handle_audio(state: &MockState, endpoint: &str, mut multipart: Multipart) -> Response {
    state.audio_count.fetch_add(1, Ordering::Relaxed);

    let mut upload = Upload {
        endpoint: endpoint.to_owned(),
        ..Upload::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();

        match name.as_str() {
            "file" => {
                upload.filename = field.file_name().map(ToOwned::to_owned);
                upload.file = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            "model" => upload.model = field.text().await.ok(),
            "response_format" => upload.response_format = field.text().await.ok(),
            "temperature" => upload.temperature = field.text().await.ok(),
            _ => {}
        }
    }

    let empty = upload.file.is_empty();
    *state.last_upload.lock().unwrap() = Some(upload);

    if state.failure == Failure::Audio {
        return upstream_error(StatusCode::BAD_GATEWAY, "mock audio failure");
    }

    if empty {
        return upstream_error(StatusCode::BAD_REQUEST, "file is required");
    }

    Json(serde_json::json!({ "text": TRANSCRIPT })).into_response()
}
