//! Minimal Gemini REST client.
//!
//! Covers exactly the two `generateContent` shapes the pipeline needs: plain
//! text generation and single-voice speech synthesis. Calls are single-shot
//! with a bounded timeout; failures propagate to the caller untouched.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::{AppError, AppResult};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Wire types for the generateContent endpoint

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<String>,
    #[serde(rename = "speechConfig")]
    speech_config: SpeechConfig,
}

#[derive(Serialize)]
struct SpeechConfig {
    #[serde(rename = "voiceConfig")]
    voice_config: VoiceConfig,
}

#[derive(Serialize)]
struct VoiceConfig {
    #[serde(rename = "prebuiltVoiceConfig")]
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Serialize)]
struct PrebuiltVoiceConfig {
    #[serde(rename = "voiceName")]
    voice_name: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct InlineData {
    data: String,
}

/// Shared HTTP client for the Gemini text and TTS models
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self::with_base_url(config, GEMINI_API_BASE)
    }

    /// Base URL override for tests pointed at a local stub
    pub fn with_base_url(config: &GeminiConfig, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Gemini returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid Gemini response: {}", e)))
    }

    /// Single-shot text generation; returns the first candidate's text
    pub async fn generate_text(&self, model: &str, prompt: &str) -> AppResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: None,
        };

        let response = self.generate(model, &request).await?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| AppError::Upstream("Gemini response contained no text".to_string()))
    }

    /// Single-shot speech synthesis; returns decoded raw PCM bytes
    pub async fn generate_speech(
        &self,
        model: &str,
        voice: &str,
        prompt: &str,
    ) -> AppResult<Vec<u8>> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.to_string(),
                        },
                    },
                },
            }),
        };

        let response = self.generate(model, &request).await?;
        let encoded = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.inline_data)
            .ok_or_else(|| AppError::Upstream("Gemini response contained no audio".to_string()))?;

        BASE64
            .decode(encoded.data.as_bytes())
            .map_err(|e| AppError::Upstream(format!("Invalid audio payload: {}", e)))
    }
}
