use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use imaginarrate::clock::SystemClock;
use imaginarrate::config;
use imaginarrate::routes;
use imaginarrate::services::{
    CaptionService, GeminiClient, SpeechService, StoryService, UsageGateService,
};
use imaginarrate::storage::FileUsageStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load configuration; a missing GEMINI_API_KEY is fatal here
    let config = config::Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!(
        "Starting ImagiNarrate server on {}:{}",
        config.host,
        config.port
    );
    log::info!("Usage record file: {}", config.usage_file);

    // One gate for the whole instance: the quota is global, not per-user
    let store = Arc::new(FileUsageStore::new(&config.usage_file));
    let gate = web::Data::new(UsageGateService::new(store, Arc::new(SystemClock)));

    let gemini = Arc::new(GeminiClient::new(&config.gemini));
    let captioner = web::Data::new(CaptionService::new(&config.caption));
    let storyteller = web::Data::new(StoryService::new(gemini.clone(), &config.gemini));
    let narrator = web::Data::new(SpeechService::new(gemini, &config.gemini));

    let host = config.host.clone();
    let port = config.port;
    let max_image_bytes = config.max_image_bytes;

    let server = HttpServer::new(move || {
        // Permissive CORS: uploads come straight from browser frontends on
        // any origin, and the API carries no cookies or sessions
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            // Share services and config with all handlers
            .app_data(web::Data::new(config.clone()))
            .app_data(gate.clone())
            .app_data(captioner.clone())
            .app_data(storyteller.clone())
            .app_data(narrator.clone())
            // Raw image uploads exceed the default payload cap
            .app_data(web::PayloadConfig::new(max_image_bytes))
            // Middleware
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(cors)
            // Health check routes
            .service(
                web::scope("/health")
                    .route("", web::get().to(routes::health::liveness))
                    .route("/ready", web::get().to(routes::health::readiness)),
            )
            .route("/health", web::get().to(routes::health::liveness))
            // API routes
            .configure(routes::usage::configure)
            .configure(routes::narrate::configure)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(30)
    .run();

    // Spawn graceful shutdown handler
    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        log::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                // Wait forever if signal handler fails
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
