//! HTTP server for the question bank.
//!
//! | route | handler |
//! | --- | --- |
//! | `GET /api/subject` | [`routes::subjects_handler`] |
//! | `GET /api/chapter` | [`routes::chapters_handler`] |
//! | `GET /api/chapter/{subject_id}` | [`routes::subject_chapters_handler`] |
//! | `GET /api/chapter/{subject_id}/tree` | [`routes::chapter_tree_handler`] |
//! | `POST /es/items/similar` | [`routes::similar_items_handler`], rate limited |
//! | `GET /health` | [`routes::health_handler`] |
//!
//! Every route runs inside [`middleware::trace_request`].
use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    middleware::from_fn_with_state,
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod retry;
pub mod routes;
pub mod search;
pub mod state;

use error::AppError;
use middleware::{rate_limit, trace_request};
use routes::{
    chapter_tree_handler, chapters_handler, health_handler, similar_items_handler,
    subject_chapters_handler, subjects_handler,
};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/subject", get(subjects_handler))
        .route("/api/chapter", get(chapters_handler))
        .route("/api/chapter/{subject_id}", get(subject_chapters_handler))
        .route("/api/chapter/{subject_id}/tree", get(chapter_tree_handler))
        .route(
            "/es/items/similar",
            post(similar_items_handler).layer(from_fn_with_state(state.clone(), rate_limit)),
        )
        .layer(from_fn_with_state(state.clone(), trace_request))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), AppError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::InternalError(Box::new(e)))?;
    info!("Server running on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::InternalError(Box::new(e)))?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
