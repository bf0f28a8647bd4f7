//! HTTP API server: axum router and request handlers.
//!
//! This is the host adapter for the animation: any device on the LAN can
//! flip the card with a bare POST, and read what's currently showing. The
//! handlers do no animation work themselves — a trigger is a non-blocking
//! `try_send` into the spinner task's channel, status is a clone out of the
//! shared snapshot.
//!
//! Both trigger endpoints are semantically identical; they exist because the
//! original device exposed two gestures (a button and a flip-of-the-wrist)
//! that do the same thing.

use crate::spinner::{SpinnerCommand, SpinnerState, SpinnerStatus};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// ── App State ────────────────────────────────────────────────────────

/// Shared application state, passed to every handler via axum's `State`
/// extractor. Everything inside is cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Channel into the animation task
    pub command_tx: Sender<SpinnerCommand>,
    /// Shared animation status (spinner task writes, handlers read)
    pub status: Arc<Mutex<SpinnerStatus>>,
}

// ── OpenAPI Documentation ────────────────────────────────────────────

#[derive(OpenApi)]
#[openapi(
    paths(get_status, post_trigger, post_flip),
    components(schemas(SpinnerStatus, SpinnerState)),
    tags(
        (name = "card", description = "Card animation triggers"),
        (name = "system", description = "System status endpoints"),
    ),
    info(
        title = "Card Spinner API",
        version = env!("CARGO_PKG_VERSION"),
        description = "HTTP API for the LED matrix card spinner"
    )
)]
pub struct ApiDoc;

// ── Router ───────────────────────────────────────────────────────────

/// Build the axum router with all API endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(
            SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
                .config(
                    utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
                        .validator_url("none"),
                ),
        )
        .route("/api/v1/status", get(get_status))
        .route("/api/v1/trigger", post(post_trigger))
        .route("/api/v1/flip", post(post_flip))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Handlers ─────────────────────────────────────────────────────────

/// GET /api/v1/status — what the display is showing right now
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "system",
    responses(
        (status = 200, description = "Current animation status", body = SpinnerStatus)
    )
)]
async fn get_status(State(state): State<AppState>) -> Json<SpinnerStatus> {
    let status = state.status.lock().unwrap().clone();
    Json(status)
}

/// POST /api/v1/trigger — primary action: spin and flip the card
#[utoipa::path(
    post,
    path = "/api/v1/trigger",
    tag = "card",
    responses(
        (status = 200, description = "Trigger accepted (or ignored while a spin is running)"),
        (status = 500, description = "Animation task gone")
    )
)]
async fn post_trigger(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, String)> {
    send_flip(&state)
}

/// POST /api/v1/flip — flip gesture: same transition as /trigger
#[utoipa::path(
    post,
    path = "/api/v1/flip",
    tag = "card",
    responses(
        (status = 200, description = "Trigger accepted (or ignored while a spin is running)"),
        (status = 500, description = "Animation task gone")
    )
)]
async fn post_flip(State(state): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    send_flip(&state)
}

/// Hand a flip command to the animation task without blocking the caller.
///
/// A full queue means a spin is in progress and this tap is ignored by
/// policy — still a 200. Only a closed channel is an error.
fn send_flip(state: &AppState) -> Result<StatusCode, (StatusCode, String)> {
    match state.command_tx.try_send(SpinnerCommand::Flip) {
        Ok(()) | Err(TrySendError::Full(_)) => Ok(StatusCode::OK),
        Err(TrySendError::Closed(_)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Animation task gone".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    fn test_state(capacity: usize) -> (AppState, mpsc::Receiver<SpinnerCommand>) {
        let (tx, rx) = mpsc::channel(capacity);
        let state = AppState {
            command_tx: tx,
            status: Arc::new(Mutex::new(SpinnerStatus::new())),
        };
        (state, rx)
    }

    #[tokio::test]
    async fn send_flip_queues_a_command() {
        let (state, mut rx) = test_state(4);
        assert_eq!(send_flip(&state), Ok(StatusCode::OK));
        assert!(matches!(rx.try_recv(), Ok(SpinnerCommand::Flip)));
    }

    #[tokio::test]
    async fn send_flip_is_ok_when_the_queue_is_full() {
        let (state, _rx) = test_state(1);
        assert_eq!(send_flip(&state), Ok(StatusCode::OK));
        // Queue now full; the next tap is ignored, not an error.
        assert_eq!(send_flip(&state), Ok(StatusCode::OK));
    }

    #[tokio::test]
    async fn send_flip_fails_when_the_task_is_gone() {
        let (state, rx) = test_state(4);
        drop(rx);
        let err = send_flip(&state).unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
