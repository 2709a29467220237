use async_trait::async_trait;
use std::time::Duration;

/// A single, fully-composed chat-completion request. Everything the bot
/// pipeline decided — persona brief, guardrails, defense-style and mood
/// instructions, history — has already been folded into `prompt` by the
/// caller; this crate doesn't know about sessions or personas.
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    pub model: String,
    pub instructions: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned an error response ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("could not parse provider response: {0}")]
    Parse(String),
}

/// The only capability the bot pipeline depends on: given a composed
/// request, produce raw model text or fail. Implementations are free to be
/// as thin as a single POST; retry/backoff policy is their own business.
#[async_trait]
pub trait GenerateReply: Send + Sync {
    async fn generate(&self, req: &ReplyRequest) -> Result<String, ReplyError>;
}

#[derive(serde::Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(serde::Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(serde::Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChatCompletionChoiceMessage {
    content: String,
}

/// Thin adapter over an OpenAI-compatible `/chat/completions` endpoint.
/// Carries no session logic of its own — just shapes the wire request and
/// unwraps the first choice's text.
pub struct HttpReplyProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpReplyProvider {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            timeout,
        }
    }
}

#[async_trait]
impl GenerateReply for HttpReplyProvider {
    async fn generate(&self, req: &ReplyRequest) -> Result<String, ReplyError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatCompletionRequest {
            model: &req.model,
            messages: vec![
                ChatCompletionMessage {
                    role: "system",
                    content: &req.instructions,
                },
                ChatCompletionMessage {
                    role: "user",
                    content: &req.prompt,
                },
            ],
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        };

        let mut builder = self.client.post(&url).json(&body).timeout(self.timeout);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = match builder.send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Err(ReplyError::Timeout(self.timeout)),
            Err(e) => return Err(ReplyError::Http(e)),
        };

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ReplyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| ReplyError::Parse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ReplyError::Parse("empty choices array".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl GenerateReply for EchoProvider {
        async fn generate(&self, req: &ReplyRequest) -> Result<String, ReplyError> {
            Ok(req.prompt.clone())
        }
    }

    #[tokio::test]
    async fn generate_reply_trait_is_object_safe_and_callable() {
        let provider: Box<dyn GenerateReply> = Box::new(EchoProvider);
        let req = ReplyRequest {
            model: "test".to_string(),
            instructions: "be yourself".to_string(),
            prompt: "hey what's up".to_string(),
            temperature: 0.7,
            max_tokens: 100,
        };
        let out = provider.generate(&req).await.unwrap();
        assert_eq!(out, "hey what's up");
    }

    #[test]
    fn reply_error_variants_carry_useful_context() {
        let e = ReplyError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(e.to_string().contains("500"));
    }
}
