//! Speech synthesis collaborator.
//!
//! Returns raw linear PCM (24 kHz, mono, 16-bit); the audio module wraps it
//! into a playable WAV.

use std::sync::Arc;

use crate::config::GeminiConfig;
use crate::error::AppResult;
use crate::services::GeminiClient;

/// Builds the narration prompt for a story
pub fn build_speech_prompt(story: &str) -> String {
    format!("Say cheerfully: {}", story)
}

pub struct SpeechService {
    gemini: Arc<GeminiClient>,
    model: String,
    voice: String,
}

impl SpeechService {
    pub fn new(gemini: Arc<GeminiClient>, config: &GeminiConfig) -> Self {
        Self {
            gemini,
            model: config.tts_model.clone(),
            voice: config.tts_voice.clone(),
        }
    }

    /// Synthesizes narration audio for the story, returning raw PCM bytes
    pub async fn synthesize(&self, story: &str) -> AppResult<Vec<u8>> {
        let prompt = build_speech_prompt(story);
        self.gemini
            .generate_speech(&self.model, &self.voice, &prompt)
            .await
    }
}
