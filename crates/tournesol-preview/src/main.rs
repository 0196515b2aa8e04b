//! `tournesol-preview` binary.
//!
//! Loads the preview assets, connects the entity store and serves PNG
//! previews of entities and comparisons. Responses carry `Cache-Control`
//! so a fronting CDN does the caching.

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tournesol_preview::{AppState, Config, router};

/// Command-line options. Everything else comes from the environment.
#[derive(Parser, Debug)]
#[command(name = "tournesol-preview")]
#[command(about = "Open Graph preview image server for Tournesol entities", long_about = None)]
struct Args {
    /// `.env` file seeding the `PREVIEW_*` and `CLICKHOUSE_*` variables, read if present.
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    // Fonts, logo and default preview are read once here; a missing one
    // aborts startup instead of failing every request later.
    let state = AppState::new(config)?;

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

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        routes = "/preview/default, /preview/entity/{uid}, /preview/comparison/{uid_a}/{uid_b}",
        "serving preview images"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
