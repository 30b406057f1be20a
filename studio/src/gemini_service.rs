use crate::config::StudioConfig;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// The raw call to a text-generation backend. Implementations may fail in
/// any way; [`GenerationClient`] is what turns failures into text.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String>;
}

pub struct GeminiService {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
    generation: GeminiGenerationConfig,
}

impl GeminiService {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.clone(),
            generation: config.generation.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl ContentGenerator for GeminiService {
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: if self.generation.is_empty() {
                None
            } else {
                Some(self.generation.clone())
            },
        };

        // Error text is shown to the user, so it must never carry the request URL.
        let response = self.client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.without_url())?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(|e| e.without_url())?;
            return Err(anyhow::anyhow!("Gemini API error ({}): {}", status, error_text));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| e.without_url())?;

        let text: String = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(anyhow::anyhow!("No response generated"));
        }

        Ok(text)
    }
}

/// Outcome of one generation call, already in displayable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success(String),
    Failure(String),
}

impl GenerationResult {
    pub fn display_text(&self) -> String {
        match self {
            GenerationResult::Success(text) => text.clone(),
            GenerationResult::Failure(description) => format!("Error: {}", description),
        }
    }
}

/// One call per prompt: no retry, no timeout, no batching.
#[derive(Clone)]
pub struct GenerationClient {
    generator: Arc<dyn ContentGenerator>,
}

impl GenerationClient {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    pub fn gemini(config: &StudioConfig) -> Self {
        Self::new(Arc::new(GeminiService::new(config)))
    }

    pub async fn generate(&self, prompt: &str) -> GenerationResult {
        log::info!("Generating content for a {} character prompt", prompt.chars().count());

        match self.generator.generate_content(prompt).await {
            Ok(text) => GenerationResult::Success(text),
            Err(e) => {
                log::warn!("Generation failed: {:#}", e);
                GenerationResult::Failure(format!("{:#}", e))
            }
        }
    }
}
