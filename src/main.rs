use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use looking_glass_backend::config::Config;
use looking_glass_backend::logging::init_subscriber;
use looking_glass_backend::routes::app_router;
use looking_glass_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_subscriber();

    tracing::info!("Starting Looking Glass backend server...");

    let config = Config::load().context("Failed to load configuration from environment")?;

    let cors_origin = config
        .cors_allow_origin
        .parse::<HeaderValue>()
        .context("Invalid CORS_ALLOW_ORIGIN value")?;
    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .context("Invalid bind address")?;

    // Single allow-origin for the dashboard frontend; credentials on, so
    // methods and headers are mirrored rather than wildcarded.
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let state = AppState::new(config);
    let app = app_router(state).layer(cors).layer(
        TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(true)),
    );

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
