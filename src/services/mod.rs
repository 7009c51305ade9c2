pub mod caption;
pub mod gemini;
pub mod speech;
pub mod story;
pub mod usage_gate;

pub use caption::CaptionService;
pub use gemini::GeminiClient;
pub use speech::SpeechService;
pub use story::StoryService;
pub use usage_gate::{GateVerdict, UsageGateService};
