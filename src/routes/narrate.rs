use actix_web::{web, HttpRequest, HttpResponse};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::audio;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::USAGE_QUOTA;
use crate::services::{CaptionService, SpeechService, StoryService, UsageGateService};

const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Response for a completed generation
#[derive(Serialize)]
pub struct NarrateResponse {
    pub caption: String,
    pub story: String,
    /// Base64-encoded WAV, ready for an `audio` element `src` data URL
    pub audio: String,
    pub audio_mime: &'static str,
    pub usage_count: u32,
    pub quota: u32,
}

#[derive(Serialize)]
struct QuotaDeniedResponse {
    error: &'static str,
    usage_count: u32,
    quota: u32,
    resets_at: DateTime<Utc>,
}

/// POST /api/narrate - Full pipeline: caption the uploaded image, generate a
/// short story, narrate it, return everything in one response.
///
/// The gate check runs before any collaborator is touched; usage is recorded
/// only after the whole pipeline has completed, so a downstream failure never
/// consumes quota.
pub async fn narrate(
    req: HttpRequest,
    body: Bytes,
    config: web::Data<Config>,
    gate: web::Data<UsageGateService>,
    captioner: web::Data<CaptionService>,
    storyteller: web::Data<StoryService>,
    narrator: web::Data<SpeechService>,
) -> AppResult<HttpResponse> {
    let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(';').next().unwrap_or(s).trim().to_ascii_lowercase())
        .unwrap_or_default();

    if !ACCEPTED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::Validation(format!(
            "Content-Type must be one of {}, got '{}'",
            ACCEPTED_IMAGE_TYPES.join(", "),
            content_type
        )));
    }

    if body.is_empty() {
        return Err(AppError::Validation("Image body is empty".to_string()));
    }

    if body.len() > config.max_image_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Image is {} bytes, limit is {}",
            body.len(),
            config.max_image_bytes
        )));
    }

    // Gate check before any expensive work
    let verdict = gate.check().await?;
    if !verdict.allowed {
        log::warn!(
            "Generation denied, quota exhausted ({}/{}), resets at {}",
            verdict.current_count,
            USAGE_QUOTA,
            verdict.resets_at
        );
        return Ok(HttpResponse::TooManyRequests()
            .insert_header(("Retry-After", verdict.retry_after_secs.to_string()))
            .json(QuotaDeniedResponse {
                error: "usage_limit_exceeded",
                usage_count: verdict.current_count,
                quota: USAGE_QUOTA,
                resets_at: verdict.resets_at,
            }));
    }

    // Single-shot pipeline; any failure propagates without consuming quota
    let caption = captioner.caption_image(&body, &content_type).await?;
    log::info!("Image captioned: {}", caption);

    let story = storyteller.generate_story(&caption).await?;
    let pcm = narrator.synthesize(&story).await?;
    let wav = audio::encode_narration_wav(&pcm);

    // Post-completion commit; a failed save is surfaced but the generated
    // story above has already been produced
    let usage_count = gate.record().await?;

    Ok(HttpResponse::Ok().json(NarrateResponse {
        caption,
        story,
        audio: BASE64.encode(&wav),
        audio_mime: "audio/wav",
        usage_count,
        quota: USAGE_QUOTA,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/narrate", web::post().to(narrate));
}
