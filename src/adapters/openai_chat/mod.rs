//! OpenAI-compatible chat completion adapter
//!
//! Talks to any endpoint implementing `POST {base_url}/chat/completions`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::json_config::LlmConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Used when the configured temperature is zero or unset
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

const GENERATE_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates ffmpeg commands.
Given a user's description of a media processing task, output ONLY the ffmpeg command to accomplish it.
Do NOT include any explanations, markdown formatting, or code blocks unless necessary.
If the input is not a media processing task, respond with exactly \"NOT_FFMPEG: <explanation>\".
The output should be a valid shell command that can be executed directly.
Do not use -y flag unless explicitly requested by the user.
Do not use quotes around the entire command.";

const MODIFY_SYSTEM_PROMPT: &str = "You are a helpful assistant that modifies ffmpeg commands.
You will be given an existing ffmpeg command and a request describing how to change it.
Output ONLY the complete modified ffmpeg command.
Do NOT include any explanations, markdown formatting, or code blocks unless necessary.
If the request has nothing to do with the command or media processing, respond with exactly \"NOT_FFMPEG: <explanation>\".
Do not add the -y flag unless explicitly requested by the user.
Do not use quotes around the entire command.";

/// Chat completion client implementing [`ModelPort`]
pub struct OpenAiChatAdapter {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl OpenAiChatAdapter {
    /// Create a client; the base URL is normalised to end with `/`
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f64,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let temperature = if temperature == 0.0 {
            DEFAULT_TEMPERATURE
        } else {
            temperature
        };

        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
            model: model.into(),
            temperature,
        }
    }

    /// Create a client from the `llm` section of the configuration
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
            config.temperature,
        )
    }

    fn url(&self) -> String {
        format!("{}chat/completions", self.base_url)
    }

    /// Send one system + user exchange and return the trimmed reply
    async fn complete(&self, system: &str, user: &str) -> Result<RawResponse, DomainError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        info!(model = %self.model, url = %self.url(), "Requesting chat completion");

        let mut builder = self.client.post(self.url()).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::ModelTransport(format!("failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::ModelTransport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(DomainError::ModelTransport(
                match serde_json::from_str::<ErrorResponse>(&body) {
                    Ok(error) => format!("API error: {}", error.error.message),
                    Err(_) => format!(
                        "API request failed with status {}: {}",
                        status.as_u16(),
                        body
                    ),
                },
            ));
        }

        let completion: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::ModelTransport(format!("failed to parse response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| DomainError::ModelTransport("no response from LLM".to_string()))?;

        debug!(response = %content, "Model replied");
        Ok(RawResponse::new(content))
    }
}

#[async_trait]
impl ModelPort for OpenAiChatAdapter {
    async fn generate_command(&self, prompt: &str) -> Result<RawResponse, DomainError> {
        self.complete(GENERATE_SYSTEM_PROMPT, prompt).await
    }

    async fn modify_command(
        &self,
        previous: &CandidateCommand,
        instruction: &str,
    ) -> Result<RawResponse, DomainError> {
        let user = format!(
            "Current command:\n{}\n\nRequested change:\n{}",
            previous, instruction
        );
        self.complete(MODIFY_SYSTEM_PROMPT, &user).await
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    #[test]
    fn test_adapter_normalises_base_url() {
        let adapter = OpenAiChatAdapter::new("http://localhost:8080/v1", "", "m", 0.5);
        assert_eq!(adapter.url(), "http://localhost:8080/v1/chat/completions");

        let adapter = OpenAiChatAdapter::new("http://localhost:8080/v1/", "", "m", 0.5);
        assert_eq!(adapter.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_adapter_defaults_temperature() {
        let adapter = OpenAiChatAdapter::new("http://x", "", "m", 0.0);
        assert_eq!(adapter.temperature, DEFAULT_TEMPERATURE);

        let adapter = OpenAiChatAdapter::new("http://x", "", "m", 0.7);
        assert_eq!(adapter.temperature, 0.7);
    }

    #[tokio::test]
    async fn test_generate_command_returns_trimmed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({ "model": "local-model" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("\n  ffmpeg -i video.mp4 output.webm \n")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let adapter = OpenAiChatAdapter::new(
            format!("{}/v1", server.uri()),
            "secret",
            "local-model",
            0.2,
        );
        let response = adapter
            .generate_command("convert video.mp4 to webm")
            .await
            .unwrap();
        assert_eq!(response.content, "ffmpeg -i video.mp4 output.webm");
    }

    #[tokio::test]
    async fn test_modify_command_sends_previous_command() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "ffmpeg -i video.mp4 -vf scale=-2:720 output.webm",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = OpenAiChatAdapter::new(server.uri(), "", "m", 0.1);
        let previous = CandidateCommand::new("ffmpeg -i video.mp4 output.webm").unwrap();
        let response = adapter
            .modify_command(&previous, "make it 720p")
            .await
            .unwrap();
        assert_eq!(
            response.content,
            "ffmpeg -i video.mp4 -vf scale=-2:720 output.webm"
        );

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.contains("ffmpeg -i video.mp4 output.webm"));
        assert!(user.contains("make it 720p"));
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": { "message": "invalid api key" } })),
            )
            .mount(&server)
            .await;

        let adapter = OpenAiChatAdapter::new(server.uri(), "bad", "m", 0.1);
        match adapter.generate_command("anything").await {
            Err(DomainError::ModelTransport(message)) => {
                assert_eq!(message, "API error: invalid api key")
            }
            other => panic!("expected ModelTransport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unstructured_error_includes_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let adapter = OpenAiChatAdapter::new(server.uri(), "", "m", 0.1);
        match adapter.generate_command("anything").await {
            Err(DomainError::ModelTransport(message)) => {
                assert_eq!(message, "API request failed with status 502: bad gateway")
            }
            other => panic!("expected ModelTransport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let adapter = OpenAiChatAdapter::new(server.uri(), "", "m", 0.1);
        match adapter.generate_command("anything").await {
            Err(DomainError::ModelTransport(message)) => {
                assert_eq!(message, "no response from LLM")
            }
            other => panic!("expected ModelTransport, got {:?}", other),
        }
    }
}
