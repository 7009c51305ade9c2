//! Unit tests for configuration parsing
//!
//! Tests environment variable parsing and default values.
//!
//! Note: These tests modify global environment variables and must run serially.

use imaginarrate::config::{CaptionConfig, Config, ConfigError, GeminiConfig};
use serial_test::serial;

fn clear_env() {
    for var in [
        "HOST",
        "PORT",
        "USAGE_FILE",
        "MAX_IMAGE_BYTES",
        "GEMINI_API_KEY",
        "STORY_MODEL",
        "TTS_MODEL",
        "TTS_VOICE",
        "CAPTION_API_URL",
        "CAPTION_API_TOKEN",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_missing_gemini_api_key_is_fatal() {
    clear_env();

    let result = Config::from_env();

    assert!(matches!(result, Err(ConfigError::MissingGeminiApiKey)));
}

#[test]
#[serial]
fn test_empty_gemini_api_key_is_fatal() {
    clear_env();
    std::env::set_var("GEMINI_API_KEY", "");

    let result = GeminiConfig::from_env();

    assert!(matches!(result, Err(ConfigError::MissingGeminiApiKey)));

    clear_env();
}

#[test]
#[serial]
fn test_config_defaults() {
    clear_env();
    std::env::set_var("GEMINI_API_KEY", "test-key");

    let config = Config::from_env().expect("config should load");

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.usage_file, "usage.json");
    assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
    assert_eq!(config.gemini.api_key, "test-key");
    assert_eq!(config.gemini.story_model, "gemini-1.5-flash");
    assert_eq!(config.gemini.tts_model, "gemini-2.5-flash-preview-tts");
    assert_eq!(config.gemini.tts_voice, "Kore");
    assert!(config.caption.endpoint.contains("blip-image-captioning"));
    assert!(config.caption.api_token.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_config_custom_values() {
    clear_env();
    std::env::set_var("GEMINI_API_KEY", "k");
    std::env::set_var("HOST", "127.0.0.1");
    std::env::set_var("PORT", "9999");
    std::env::set_var("USAGE_FILE", "/var/lib/imaginarrate/usage.json");
    std::env::set_var("STORY_MODEL", "gemini-2.0-flash");
    std::env::set_var("TTS_VOICE", "Puck");
    std::env::set_var("CAPTION_API_URL", "http://localhost:9000/caption");
    std::env::set_var("CAPTION_API_TOKEN", "hf_secret");

    let config = Config::from_env().expect("config should load");

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9999);
    assert_eq!(config.usage_file, "/var/lib/imaginarrate/usage.json");
    assert_eq!(config.gemini.story_model, "gemini-2.0-flash");
    assert_eq!(config.gemini.tts_voice, "Puck");
    assert_eq!(config.caption.endpoint, "http://localhost:9000/caption");
    assert_eq!(config.caption.api_token.as_deref(), Some("hf_secret"));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    std::env::set_var("GEMINI_API_KEY", "k");
    std::env::set_var("PORT", "not-a-port");

    let result = Config::from_env();

    assert!(matches!(result, Err(ConfigError::InvalidPort)));

    clear_env();
}

#[test]
#[serial]
fn test_invalid_max_image_bytes_is_rejected() {
    clear_env();
    std::env::set_var("GEMINI_API_KEY", "k");
    std::env::set_var("MAX_IMAGE_BYTES", "lots");

    let result = Config::from_env();

    assert!(matches!(result, Err(ConfigError::InvalidMaxImageBytes)));

    clear_env();
}

#[test]
#[serial]
fn test_empty_caption_token_treated_as_unset() {
    clear_env();
    std::env::set_var("CAPTION_API_TOKEN", "");

    let config = CaptionConfig::from_env();

    assert!(config.api_token.is_none());

    clear_env();
}
