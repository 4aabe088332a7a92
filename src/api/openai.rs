use crate::models::{ChatErrorResponse, ChatMessage, ChatRequest, ChatResponse};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Format check only; no request is made.
    pub fn looks_ready(api_key: &str) -> bool {
        api_key.len() > 20 && api_key.starts_with("sk-")
    }

    /// Run one chat completion and return the assistant's text.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: MODEL,
            messages,
            temperature: 0.3,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .context("Failed to reach OpenAI")?;

        let status = response.status();
        let text = response.text().await.context("Failed to read response")?;

        if !status.is_success() {
            let message = serde_json::from_str::<ChatErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("OpenAI API error: {}", status));
            return Err(anyhow::anyhow!(message));
        }

        let resp: ChatResponse = serde_json::from_str(&text).context(format!(
            "Parse error. Response: {}",
            text.chars().take(200).collect::<String>()
        ))?;
        resp.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("OpenAI returned no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;

    #[test]
    fn readiness_needs_prefix_and_length() {
        assert!(OpenAIClient::looks_ready("sk-0123456789abcdefghij"));
        assert!(!OpenAIClient::looks_ready("sk-short"));
        assert!(!OpenAIClient::looks_ready("pk-0123456789abcdefghijkl"));
    }

    fn chat_reply(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn complete_posts_model_and_returns_first_choice() {
        let (base, requests) = test_server::serve(200, chat_reply("Hello there")).await;
        let client = OpenAIClient::with_base_url("sk-test".to_string(), format!("{}/v1", base));
        let reply = client
            .complete(vec![ChatMessage::user("hi")], 50, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(reply, "Hello there");

        let seen = requests.lock().unwrap();
        assert!(seen[0].starts_with("POST /v1/chat/completions"));
        assert!(seen[0].to_lowercase().contains("authorization: bearer sk-test"));
        assert!(seen[0].contains("\"model\":\"gpt-4o-mini\""));
    }

    #[tokio::test]
    async fn error_status_uses_api_message() {
        let (base, _) = test_server::serve(
            401,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .await;
        let client = OpenAIClient::with_base_url("sk-bad".to_string(), base);
        let err = client
            .complete(vec![ChatMessage::user("hi")], 50, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Incorrect API key provided");

        let (base, _) = test_server::serve(500, "oops").await;
        let client = OpenAIClient::with_base_url("sk-bad".to_string(), base);
        let err = client
            .complete(vec![ChatMessage::user("hi")], 50, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "OpenAI API error: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn empty_choices_and_bad_json_fail() {
        let (base, _) = test_server::serve(200, r#"{"choices":[]}"#).await;
        let client = OpenAIClient::with_base_url("sk".to_string(), base);
        let err = client
            .complete(vec![ChatMessage::user("hi")], 50, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "OpenAI returned no choices");

        let (base, _) = test_server::serve(200, "not json").await;
        let client = OpenAIClient::with_base_url("sk".to_string(), base);
        let err = client
            .complete(vec![ChatMessage::user("hi")], 50, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).starts_with("Parse error. Response: not json"));
    }
}
