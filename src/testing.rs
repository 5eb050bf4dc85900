//! Test doubles shared by the module tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::ProfileApiConfig;
use crate::error::LookupError;
use crate::llm::{ChatMessage, ChatResponse, FunctionCall, LlmClient, ToolCall, ToolSchema};
use crate::profile::ProfileClient;
use crate::search::ProfileSearch;

/// A completion request as seen by [`ScriptedLlm`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tool_names: Vec<String>,
}

/// LLM client that replays canned responses in order.
pub struct ScriptedLlm {
    script: Mutex<VecDeque<Result<ChatResponse, LookupError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedLlm {
    pub fn new(script: Vec<Result<ChatResponse, LookupError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<ChatResponse, LookupError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            tool_names: tools
                .unwrap_or_default()
                .iter()
                .map(|t| t.function.name.clone())
                .collect(),
        });
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LookupError::AgentFailure("script exhausted".to_string())))
    }
}

pub fn answer(text: &str) -> ChatResponse {
    ChatResponse {
        content: Some(text.to_string()),
        tool_calls: None,
        finish_reason: Some("stop".to_string()),
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> ChatResponse {
    ChatResponse {
        content: None,
        tool_calls: Some(vec![ToolCall {
            id: id.to_string(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }]),
        finish_reason: Some("tool_calls".to_string()),
    }
}

/// Search backend with a fixed query → URL table.
pub struct StubSearch {
    urls: HashMap<String, String>,
    unavailable: bool,
}

impl StubSearch {
    pub fn empty() -> Self {
        Self {
            urls: HashMap::new(),
            unavailable: false,
        }
    }

    /// Every search fails with HTTP 503.
    pub fn unavailable() -> Self {
        Self {
            urls: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn with(query: &str, url: &str) -> Self {
        let mut urls = HashMap::new();
        urls.insert(query.to_string(), url.to_string());
        Self {
            urls,
            unavailable: false,
        }
    }
}

#[async_trait]
impl ProfileSearch for StubSearch {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &str) -> Result<String, LookupError> {
        if self.unavailable {
            return Err(LookupError::ProviderStatus {
                provider: "search",
                status: 503,
                body: "search backend unavailable".to_string(),
            });
        }
        self.urls
            .get(query)
            .cloned()
            .ok_or_else(|| LookupError::NoProfileFound {
                query: query.to_string(),
            })
    }
}

/// What the local HTTP stub does with each connection.
#[derive(Debug, Clone)]
pub enum StubReply {
    Respond {
        status: u16,
        content_type: &'static str,
        body: String,
    },
    /// Accept the connection and never answer.
    Hang,
}

impl StubReply {
    pub fn json(body: serde_json::Value) -> Self {
        StubReply::Respond {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }
}

/// Minimal HTTP/1.1 server on a random local port.
pub struct HttpStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl HttpStub {
    pub async fn serve(reply: StubReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(handle(socket, reply.clone(), seen.clone()));
            }
        });

        Self { base_url, requests }
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(mut socket: TcpStream, reply: StubReply, seen: Arc<Mutex<Vec<String>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    seen.lock().unwrap().push(String::from_utf8_lossy(&buf).into_owned());

    match reply {
        StubReply::Hang => tokio::time::sleep(Duration::from_secs(60)).await,
        StubReply::Respond {
            status,
            content_type,
            body,
        } => {
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                if status < 400 { "OK" } else { "Error" },
                content_type,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    }
}

/// Profile client that talks to local stubs directly, bypassing any proxy.
pub fn profile_client(config: ProfileApiConfig) -> ProfileClient {
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .no_proxy()
        .build()
        .unwrap();
    ProfileClient::with_http_client(config, http)
}
