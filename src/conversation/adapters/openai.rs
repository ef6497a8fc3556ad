//! `OpenAI`-compatible chat-completions invoker.
//!
//! Sends the rendered instructions as the system message followed by the
//! participant's transcript. Structured participants request a JSON object
//! response. Tool calls are executed through [`RecordTools`] and fed back
//! until the model produces a final message or the round limit is reached.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::OpenAiConfig;
use crate::conversation::domain::{OutputProtocol, Role};
use crate::conversation::ports::invoker::{
    InvocationError, InvocationRequest, InvocationResult, ParticipantInvoker,
};
use crate::conversation::ports::record_store::RecordStore;
use crate::conversation::services::RecordTools;

/// Tool-call rounds allowed per invocation.
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs participants on an `OpenAI`-compatible chat-completions endpoint.
pub struct OpenAiInvoker<S: RecordStore> {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    tools: RecordTools<S>,
    max_tool_rounds: usize,
}

impl<S: RecordStore> OpenAiInvoker<S> {
    /// Creates an invoker.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::Unknown`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &OpenAiConfig, tools: RecordTools<S>) -> InvocationResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| InvocationError::Unknown(format!("HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            tools,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        })
    }

    /// Sets the tool-call round limit.
    #[must_use]
    pub const fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    async fn complete(&self, body: &ChatRequest<'_>) -> InvocationResult<ChatMessage> {
        let started = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    InvocationError::Network(format!("request timeout: {err}"))
                } else if err.is_connect() {
                    InvocationError::Network(format!("connection failed: {err}"))
                } else {
                    InvocationError::Unknown(format!("request failed: {err}"))
                }
            })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs);
        let text = response
            .text()
            .await
            .map_err(|err| InvocationError::Network(format!("failed to read response: {err}")))?;

        info!(
            model = %self.model,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "chat completion finished"
        );

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &text, retry_after));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|err| InvocationError::Unknown(format!("failed to parse response: {err}")))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(InvocationError::EmptyResponse)
    }
}

#[async_trait]
impl<S: RecordStore> ParticipantInvoker for OpenAiInvoker<S> {
    async fn invoke(&self, request: InvocationRequest<'_>) -> InvocationResult<String> {
        let participant = request.participant;
        let mut messages = Vec::with_capacity(request.input.len().saturating_add(1));
        messages.push(ChatMessage::text("system", request.instructions));
        messages.extend(request.input.iter().map(|entry| {
            let role = match entry.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            ChatMessage::text(role, &entry.content)
        }));

        let tools: Vec<ToolSpec> = participant
            .tools()
            .iter()
            .map(|tool| ToolSpec {
                kind: "function",
                function: FunctionSpec {
                    name: tool.name(),
                    description: tool.description(),
                    parameters: tool.parameters_schema(),
                },
            })
            .collect();
        let response_format = match participant.output_protocol() {
            OutputProtocol::Structured => Some(ResponseFormat {
                kind: "json_object",
            }),
            OutputProtocol::FreeText => None,
        };

        for round in 0..=self.max_tool_rounds {
            let body = ChatRequest {
                model: &self.model,
                messages: &messages,
                tools: (!tools.is_empty()).then_some(tools.as_slice()),
                response_format: response_format.as_ref(),
            };
            let reply = self.complete(&body).await?;

            let calls = reply.tool_calls.clone().unwrap_or_default();
            if calls.is_empty() {
                return reply
                    .content
                    .filter(|content| !content.trim().is_empty())
                    .ok_or(InvocationError::EmptyResponse);
            }

            debug!(
                participant = %participant.name(),
                round,
                calls = calls.len(),
                "executing tool calls"
            );
            messages.push(reply);
            for call in calls {
                let result = self
                    .tools
                    .execute(&call.function.name, &call.function.arguments)
                    .await;
                messages.push(ChatMessage::tool_result(call.id, result));
            }
        }

        Err(InvocationError::ToolLoopExhausted {
            limit: self.max_tool_rounds,
        })
    }
}

fn classify_failure(status: u16, body: &str, retry_after: Option<Duration>) -> InvocationError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|err| err.error.message)
        .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
    match status {
        401 | 403 => InvocationError::Auth(message),
        429 => InvocationError::RateLimited {
            message,
            retry_after,
        },
        400 | 404 | 422 => InvocationError::InvalidRequest(message),
        500..=599 => InvocationError::Server(message),
        _ => InvocationError::Unknown(message),
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSpec]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a ResponseFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_owned(),
            content: Some(content.to_owned()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    fn tool_result(tool_call_id: String, content: String) -> Self {
        Self {
            role: "tool".to_owned(),
            content: Some(content),
            tool_calls: None,
            tool_call_id: Some(tool_call_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: FunctionCall,
}

fn function_kind() -> String {
    "function".to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct ToolSpec {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionSpec,
}

#[derive(Serialize)]
struct FunctionSpec {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
