//! services/api/src/bin/api.rs

use api_lib::{
    adapters::assistant::OpenAiAssistantAdapter,
    config::Config,
    error::ApiError,
    web::{
        auth::{login_handler, logout_handler},
        cancel_handler, download_transcript_handler, get_form_handler, middleware::require_session,
        reset_handler, rest::ApiDoc, state::{AppState, Sessions}, submit_feedback_handler,
        submit_speech_handler,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    // Missing secrets (passwords, API key, assistant id) are fatal here.
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Assistant Adapter ---
    let openai_config = OpenAIConfig::new().with_api_key(&config.openai_api_key);
    let openai_client = Client::with_config(openai_config);
    let assistant = Arc::new(OpenAiAssistantAdapter::new(
        openai_client,
        config.assistant_id.clone(),
    ));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        assistant,
        config: config.clone(),
        sessions: Sessions::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler));

    // Protected routes (gated behind the shared password)
    let protected_routes = Router::new()
        .route("/form", get(get_form_handler))
        .route("/speech", post(submit_speech_handler))
        .route("/speech/feedback", post(submit_feedback_handler))
        .route("/speech/cancel", post(cancel_handler))
        .route("/speech/transcript", get(download_transcript_handler))
        .route("/speech/reset", post(reset_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
