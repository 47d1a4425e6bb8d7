//! Documentation of a single-page noodle tracker.
//!
//!
//!
//! # General Infrastructure
//! - Visits live in a MongoDB collection, added by hand outside this server
//! - Every page load runs one `find().sort().limit()` and renders the result to HTML
//! - No client script, no JSON API, no write path
//! - One extra action pings the deployment to check connectivity
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `GET` | `/` | Rendered page, always `200` |
//! | `POST` | `/actions/test-connection` | `true` or `false` as plain text |
//!
//!
//!
//! # Failure Handling
//!
//! Every database failure (missing URI, network, auth, bad query) is logged and
//! collapsed into a single "could not connect" page. Nothing is retried.
//!
//! A visit whose date will not parse does not fail the page either, the header
//! just reads `NaN` days.
//!
//!
//!
//! # Environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RUST_PORT` | `1111` |
//! | `MONGODB_URI` | none, also read from `/run/secrets/MONGODB_URI` |
//! | `MONGODB_DATABASE` | `personal` |
//! | `MONGODB_COLLECTION` | `pho-tracker` |
//! | `RUST_LOG` | tracing filter, e.g. `info` |
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! MONGODB_URI="mongodb://localhost:27017" RUST_LOG=info cargo run -p noodle
//! ```
//!
//! Check connectivity.
//! ```sh
//! curl -X POST http://localhost:1111/actions/test-connection
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
pub mod utils;
pub mod view;

use config::Config;
use error::AppError;
use routes::{home_handler, test_connection_handler};
use state::AppState;

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new(Config::load()?);

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(home_handler))
        .route("/actions/test-connection", post(test_connection_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
