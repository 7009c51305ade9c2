//! Story generation collaborator.

use std::sync::Arc;

use crate::config::GeminiConfig;
use crate::error::AppResult;
use crate::services::GeminiClient;

/// Builds the storyteller prompt for a caption.
///
/// The 50-word cap is a request to the model, not an enforced limit.
pub fn build_story_prompt(scenario: &str) -> String {
    format!(
        "You are a story teller;\n\
         You can generate a short story based on a simple narrative, \
         the story should be no more than 50 words;\n\n\
         CONTEXT: {}\n\
         STORY:\n",
        scenario
    )
}

pub struct StoryService {
    gemini: Arc<GeminiClient>,
    model: String,
}

impl StoryService {
    pub fn new(gemini: Arc<GeminiClient>, config: &GeminiConfig) -> Self {
        Self {
            gemini,
            model: config.story_model.clone(),
        }
    }

    /// Generates a short story from the image caption
    pub async fn generate_story(&self, scenario: &str) -> AppResult<String> {
        let prompt = build_story_prompt(scenario);
        let story = self.gemini.generate_text(&self.model, &prompt).await?;
        Ok(story.trim().to_string())
    }
}
