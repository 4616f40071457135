//! Order of 86 showcase server binary.
//!
//! Serves the static showcase site, wizard profile pages, and
//! on-demand Open Graph card images.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use order86_core::WizardStore;
use order86_serve::{AppState, Config, ratelimit, router};

/// Order of 86 - showcase site and OG card server.
#[derive(Parser, Debug)]
#[command(name = "order86-serve")]
#[command(about = "HTTP server for the Order of 86 wizard showcase", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration and the wizard data source
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let store = WizardStore::load(&config.data_path);

    // Create application state and start the limiter sweep
    let state = AppState::new(config, store);
    ratelimit::spawn_sweeper(Arc::clone(&state.limiter));

    // Build router with middleware
    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting showcase server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
