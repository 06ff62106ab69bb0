//! Ollama HTTP client for embeddings and text generation.
//!
//! Embeddings come from `/api/embeddings` (nomic-embed-text, 768 dimensions by
//! default); paraphrases and answer rewrites from `/api/generate`.

use async_trait::async_trait;
use qnabot_core::{EmbeddingError, EmbeddingProvider, Settings};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::prompts;

/// Expected embedding dimension for nomic-embed-text.
pub const EMBEDDING_DIM: usize = 768;

/// Ollama client covering both the embedding and generation endpoints.
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    embed_model: String,
    gen_model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

impl OllamaClient {
    /// Create a client. `timeout` bounds every request.
    pub fn new(
        base_url: &str,
        embed_model: &str,
        gen_model: &str,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Transport(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            embed_model: embed_model.to_string(),
            gen_model: gen_model.to_string(),
            client,
        })
    }

    /// Create a client from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, EmbeddingError> {
        Self::new(
            &settings.ollama_url,
            &settings.embed_model,
            &settings.gen_model,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, EmbeddingError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| EmbeddingError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| EmbeddingError::Malformed(e.to_string()))
    }

    /// Generate text from a prompt with the generation model.
    pub async fn generate(&self, prompt: &str) -> Result<String, EmbeddingError> {
        let request = GenerateRequest {
            model: &self.gen_model,
            prompt,
            stream: false,
        };
        let result = self.post_json("/api/generate", &request).await?;
        let text = result["response"].as_str().unwrap_or("").trim().to_string();
        debug!(model = %self.gen_model, chars = text.len(), "Generated text");
        Ok(text)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let request = EmbeddingRequest {
            model: &self.embed_model,
            prompt: text,
        };
        let value = self.post_json("/api/embeddings", &request).await?;
        let result: EmbeddingResponse =
            serde_json::from_value(value).map_err(|e| EmbeddingError::Malformed(e.to_string()))?;
        if result.embedding.is_empty() {
            return Err(EmbeddingError::Malformed("empty embedding".to_string()));
        }

        debug!(dim = result.embedding.len(), "Generated embedding");
        Ok(result.embedding)
    }

    async fn paraphrase(&self, question: &str) -> Result<Vec<String>, EmbeddingError> {
        let raw = self.generate(&prompts::paraphrase_prompt(question)).await?;
        let questions = prompts::parse_paraphrases(&raw, question);
        debug!(count = questions.len(), "Parsed paraphrases");
        Ok(questions)
    }

    async fn reword_answer(&self, question: &str, answer: &str) -> Result<String, EmbeddingError> {
        let text = self
            .generate(&prompts::answer_rewrite_prompt(question, answer))
            .await?;
        if text.is_empty() {
            return Err(EmbeddingError::Malformed("empty rewrite".to_string()));
        }
        Ok(text)
    }

    /// Healthy when `/api/tags` answers and lists the embedding model.
    async fn health_check(&self) -> bool {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let text = resp.text().await.unwrap_or_default();
                text.contains(&self.embed_model)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let c = OllamaClient::new("http://host:11434/", "e", "g", Duration::from_secs(1)).unwrap();
        assert_eq!(c.base_url(), "http://host:11434");
    }

    #[tokio::test]
    async fn test_request_timeout_is_enforced() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let c = OllamaClient::new(&format!("http://{}", addr), "e", "g", Duration::from_millis(100))
            .unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), c.embed("hello"))
            .await
            .expect("client timeout should fire first");
        assert!(matches!(result, Err(EmbeddingError::Transport(_))));
    }

    #[tokio::test]
    async fn test_blank_text_rejected_without_request() {
        // Port 9 (discard) would fail transport; EmptyInput proves no call was made.
        let c = OllamaClient::new("http://127.0.0.1:9", "e", "g", Duration::from_millis(50)).unwrap();
        assert_eq!(c.embed("   ").await, Err(EmbeddingError::EmptyInput));
    }
}
