use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::engine::normalizer::normalize;
use crate::engine::provider::Provider;
use crate::model::turn::Turn;

/// Pause before a scripted reply so the bench reads as deliberating rather
/// than erroring instantly.
const SCRIPTED_REPLY_DELAY: Duration = Duration::from_secs(1);

/// Shared state for the HTTP server: the provider selected at startup.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn Provider>,
}

/// Request body for POST /api/chat. The client resends the full transcript
/// on every call; nothing is kept between requests.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<Turn>,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    provider: &'static str,
}

/// One exchange: translate, call the provider, normalize. Always answers
/// 200 with a record-shaped JSON body, scripted if the upstream failed.
async fn handle_chat(State(state): State<AppState>, Json(body): Json<ChatRequest>) -> Json<Value> {
    tracing::info!("player message: {}", body.message);

    let reply = state.provider.generate(&body.history, &body.message).await;
    let outcome = normalize(reply, &body.message);
    if outcome.is_scripted() {
        tokio::time::sleep(SCRIPTED_REPLY_DELAY).await;
    }
    Json(outcome.into_value())
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        provider: state.provider.name(),
    })
}

/// Build the router. CORS is wide open: the browser client is served from
/// elsewhere.
pub fn router(provider: Arc<dyn Provider>) -> Router {
    let state = AppState { provider };
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/chat", post(handle_chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP server on `0.0.0.0:{port}`. Graceful shutdown on Ctrl+C
/// (SIGINT) and SIGTERM; in-flight requests complete before exit.
pub async fn run(provider: Arc<dyn Provider>, port: u16) -> anyhow::Result<()> {
    let app = router(provider);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("server running on port {port} (Ctrl+C/SIGTERM to stop)");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to listen for SIGTERM");
        tokio::select! {
            _ = ctrl_c => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for Ctrl+C");
    }
}
