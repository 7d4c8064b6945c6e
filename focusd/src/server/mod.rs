//! focusd web server.
//!
//! Endpoints:
//! - GET / - Home page
//! - GET /focus - Timer page
//! - GET /dashboard - Totals and recent history
//! - POST /api/session/start - Start a session
//! - POST /api/session/end - End the session in progress
//! - GET /api/stats - Totals plus the last seven days
//! - GET /api/audio-files - Ambient audio tracks
//! - GET /api/backgrounds - Background images
//! - GET /static/* - Files from the static directory

mod pages;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::SecondsFormat;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::assets::{list_assets, AssetEntry, AssetKind};
use crate::config::{self, Config};
use crate::error::ApiError;
use crate::models::{DEFAULT_DURATION_MINUTES, DEFAULT_ENVIRONMENT, DEFAULT_SESSION_TYPE};
use crate::stats::{self, DailyStat, Summary};
use crate::store::SessionStore;

/// Shared server state.
pub struct AppState {
    /// Session history and the session in progress.
    store: RwLock<SessionStore>,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: RwLock::new(SessionStore::new()),
            config,
        }
    }
}

// === Request/Response Types ===

/// Request to start a session. Missing fields take the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    pub duration: Option<f64>,
    #[serde(rename = "type")]
    pub session_type: Option<String>,
    pub environment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub session_id: u64,
    /// RFC 3339 timestamp.
    pub start_time: String,
}

/// Request to end the session in progress.
#[derive(Debug, Default, Deserialize)]
pub struct EndRequest {
    pub actual_duration: Option<f64>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndResponse {
    pub success: bool,
}

/// Payload of `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: Summary,
    pub daily_stats: Vec<DailyStat>,
}

// === Server Lifecycle ===

/// Build the application router around `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/", get(index_handler))
        .route("/focus", get(focus_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/api/session/start", post(start_session))
        .route("/api/session/end", post(end_session))
        .route("/api/stats", get(get_stats))
        .route("/api/audio-files", get(get_audio_files))
        .route("/api/backgrounds", get(get_backgrounds))
        .nest_service("/static", static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until Ctrl-C.
pub async fn start_server(config: Config) -> Result<()> {
    let addr = config.addr();
    let open_browser = config.open_browser;

    if !config.static_dir.is_dir() {
        warn!(
            dir = %config.static_dir.display(),
            "static directory not found; asset lists will be empty"
        );
    }

    let app = build_router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let bound = listener.local_addr()?;

    let port_file = config::port_file()?;
    if let Some(dir) = port_file.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    std::fs::write(&port_file, bound.port().to_string())
        .with_context(|| format!("Failed to write {}", port_file.display()))?;

    info!("focusd listening on http://{bound}");

    if open_browser {
        if let Err(e) = open::that(format!("http://{bound}")) {
            warn!(error = %e, "could not open browser");
        }
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error");

    let _ = std::fs::remove_file(&port_file);
    info!("focusd stopped");

    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Parse an optional JSON body. An empty body means "all defaults".
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

// === Handlers ===

async fn index_handler() -> Html<&'static str> {
    Html(pages::INDEX)
}

async fn focus_handler() -> Html<&'static str> {
    Html(pages::FOCUS)
}

async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let store = state.store.read().await;
    let history = store.history();
    Html(pages::render_dashboard(
        &stats::summary(history),
        stats::recent(history, stats::RECENT_LIMIT),
        store.current(),
    ))
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<StartResponse>, ApiError> {
    let req: StartRequest = parse_body(&body)?;

    let mut store = state.store.write().await;
    let session = store.start_session(
        req.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
        req.session_type.as_deref().unwrap_or(DEFAULT_SESSION_TYPE),
        req.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT),
    );

    Ok(Json(StartResponse {
        session_id: session.id,
        start_time: session
            .start_time
            .to_rfc3339_opts(SecondsFormat::Micros, false),
    }))
}

async fn end_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<EndResponse>, ApiError> {
    let req: EndRequest = parse_body(&body)?;

    let mut store = state.store.write().await;
    store.end_session(req.actual_duration, req.completed.unwrap_or(true))?;

    Ok(Json(EndResponse { success: true }))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let store = state.store.read().await;
    let history = store.history();

    Json(StatsResponse {
        summary: stats::summary(history),
        daily_stats: stats::last_week(history),
    })
}

async fn get_audio_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssetEntry>>, ApiError> {
    let assets = list_assets(&state.config.audio_dir(), AssetKind::Audio).await?;
    Ok(Json(assets))
}

async fn get_backgrounds(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssetEntry>>, ApiError> {
    let assets = list_assets(&state.config.backgrounds_dir(), AssetKind::Background).await?;
    Ok(Json(assets))
}
