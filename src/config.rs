use std::env;

/// Default captioning endpoint (BLIP base on the HuggingFace Inference API)
const DEFAULT_CAPTION_API_URL: &str =
    "https://api-inference.huggingface.co/models/Salesforce/blip-image-captioning-base";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path of the persisted usage record
    pub usage_file: String,
    /// Max accepted upload size in bytes
    pub max_image_bytes: usize,
    pub gemini: GeminiConfig,
    pub caption: CaptionConfig,
}

/// Gemini credentials and model selection for story + speech generation
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub story_model: String,
    pub tts_model: String,
    pub tts_voice: String,
}

/// Image captioning collaborator configuration
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    pub endpoint: String,
    /// Optional bearer token; the public inference API works anonymously
    /// with tighter upstream limits
    pub api_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            usage_file: env::var("USAGE_FILE").unwrap_or_else(|_| "usage.json".to_string()),
            max_image_bytes: env::var("MAX_IMAGE_BYTES")
                .unwrap_or_else(|_| "10485760".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidMaxImageBytes)?,
            gemini: GeminiConfig::from_env()?,
            caption: CaptionConfig::from_env(),
        })
    }
}

impl GeminiConfig {
    /// Load Gemini configuration from environment variables
    ///
    /// A missing API key is fatal: the whole pipeline depends on it, so the
    /// service refuses to start rather than degrade.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => key,
            _ => return Err(ConfigError::MissingGeminiApiKey),
        };

        Ok(Self {
            api_key,
            story_model: env::var("STORY_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            tts_model: env::var("TTS_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-preview-tts".to_string()),
            tts_voice: env::var("TTS_VOICE").unwrap_or_else(|_| "Kore".to_string()),
        })
    }
}

impl CaptionConfig {
    /// Load captioning configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            endpoint: env::var("CAPTION_API_URL")
                .unwrap_or_else(|_| DEFAULT_CAPTION_API_URL.to_string()),
            api_token: env::var("CAPTION_API_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidMaxImageBytes,
    MissingGeminiApiKey,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::InvalidMaxImageBytes => {
                write!(f, "MAX_IMAGE_BYTES must be a valid number")
            }
            ConfigError::MissingGeminiApiKey => {
                write!(f, "GEMINI_API_KEY environment variable is required")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
