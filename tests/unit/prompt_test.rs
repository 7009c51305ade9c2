//! Unit tests for the fixed prompt templates sent to the collaborators

use imaginarrate::services::speech::build_speech_prompt;
use imaginarrate::services::story::build_story_prompt;

#[test]
fn test_story_prompt_embeds_caption_as_context() {
    let prompt = build_story_prompt("a dog chasing a red ball in the park");

    assert!(prompt.contains("You are a story teller"));
    assert!(prompt.contains("no more than 50 words"));
    assert!(prompt.contains("CONTEXT: a dog chasing a red ball in the park"));
    assert!(prompt.trim_end().ends_with("STORY:"));
}

#[test]
fn test_speech_prompt_wraps_story() {
    let prompt = build_speech_prompt("Once upon a time, a ball rolled away.");

    assert_eq!(
        prompt,
        "Say cheerfully: Once upon a time, a ball rolled away."
    );
}
