//! OpenAI-compatible chat-completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, ChatResponse, LlmClient, ToolCall, ToolSchema};
use crate::error::LookupError;

const PROVIDER: &str = "openai";

/// Sampling temperature for every completion; lookups must be reproducible.
pub const DETERMINISTIC_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSchema]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

/// Client for `POST {base_url}/chat/completions`.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<ChatResponse, LookupError> {
        let tools = tools.filter(|t| !t.is_empty());
        let request = CompletionRequest {
            model,
            messages,
            temperature: DETERMINISTIC_TEMPERATURE,
            tools,
            tool_choice: tools.map(|_| "auto"),
        };

        tracing::debug!(
            model = %model,
            messages = messages.len(),
            url = %self.completions_url(),
            "Requesting chat completion"
        );

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest(PROVIDER, None, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::ProviderStatus {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::from_reqwest(PROVIDER, None, e))?;

        parse_completion(&body)
    }
}

fn parse_completion(body: &str) -> Result<ChatResponse, LookupError> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|e| LookupError::MalformedResponse {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::MalformedResponse {
            provider: PROVIDER,
            message: "response contained no choices".to_string(),
        })?;

    Ok(ChatResponse {
        content: choice.message.content,
        tool_calls: choice.message.tool_calls,
        finish_reason: choice.finish_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_is_deterministic_and_offers_tools() {
        let messages = vec![ChatMessage::user("find Jane")];
        let tools = vec![ToolSchema {
            tool_type: "function".to_string(),
            function: super::super::FunctionDefinition {
                name: "LinkedIn".to_string(),
                description: "Search for the LinkedIn profile of the person.".to_string(),
                parameters: json!({"type": "object"}),
            },
        }];
        let request = CompletionRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            temperature: DETERMINISTIC_TEMPERATURE,
            tools: Some(&tools),
            tool_choice: Some("auto"),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["temperature"], json!(0.0));
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["tools"][0]["function"]["name"], "LinkedIn");
        assert_eq!(value["tool_choice"], "auto");
    }

    #[test]
    fn request_without_tools_omits_tool_fields() {
        let messages = vec![ChatMessage::user("hi")];
        let request = CompletionRequest {
            model: "m",
            messages: &messages,
            temperature: DETERMINISTIC_TEMPERATURE,
            tools: None,
            tool_choice: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
    }

    #[test]
    fn parses_tool_call_response() {
        let body = json!({
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "LinkedIn", "arguments": "{\"query\":\"John Doe\"}"}
                    }]
                }
            }]
        })
        .to_string();

        let response = parse_completion(&body).unwrap();
        assert!(response.content.is_none());
        assert_eq!(response.finish_reason.as_deref(), Some("tool_calls"));
        let calls = response.tool_calls.unwrap();
        assert_eq!(calls[0].id, "call_abc");
        assert_eq!(calls[0].function.arguments, "{\"query\":\"John Doe\"}");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let err = parse_completion("{\"choices\": []}").unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse { .. }));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_completion("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, LookupError::MalformedResponse { provider: "openai", .. }));
    }

    #[test]
    fn completions_url_trims_trailing_slash() {
        let client = OpenAiClient::new("k", "https://api.openai.com/v1/");
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
