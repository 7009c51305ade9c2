//! Image captioning collaborator.
//!
//! Posts the raw image bytes to a hosted image-to-text model and returns the
//! generated caption. One call, no retries; failures propagate.

use serde::Deserialize;

use crate::config::CaptionConfig;
use crate::error::{AppError, AppResult};

#[derive(Deserialize)]
struct CaptionCandidate {
    generated_text: String,
}

pub struct CaptionService {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl CaptionService {
    pub fn new(config: &CaptionConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// Derives a short natural-language caption for the image
    pub async fn caption_image(&self, image: &[u8], content_type: &str) -> AppResult<String> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", content_type)
            .body(image.to_vec());

        if let Some(ref token) = self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Captioning request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Captioning service returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let candidates: Vec<CaptionCandidate> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid captioning response: {}", e)))?;

        candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| AppError::Upstream("Captioning service returned no caption".to_string()))
    }
}
