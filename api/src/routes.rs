use crate::api_error::ApiError;
use crate::chat_payload::ChatPayload;
use crate::selection_payload::{ScreenPayload, TaskPayload};
use crate::session_response::{HealthResponse, SessionResponse};
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use studio::{Action, GenerationClient, SessionId, SessionStore, StudioError, View, ViewRenderer};
use tower_http::cors::CorsLayer;

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub renderer: Arc<ViewRenderer>,
}

impl AppState {
    pub fn new(client: GenerationClient) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            renderer: Arc::new(ViewRenderer::new(client)),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(show_session).delete(end_session))
        .route("/sessions/:id/continue", post(continue_session))
        .route("/sessions/:id/screen", put(select_screen))
        .route("/sessions/:id/task", put(select_task))
        .route("/sessions/:id/chat", post(submit_chat))
        .route("/sessions/:id/pdf", post(ask_pdf))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs one action with the session locked, so submissions on the same
/// session never overlap. Ids that were never issued, or have expired, are 404.
async fn dispatch(state: &AppState, id: SessionId, action: Action) -> Result<Json<View>, ApiError> {
    let handle = state
        .sessions
        .find(id)
        .await
        .ok_or(StudioError::SessionNotFound(id))?;
    let mut session = handle.lock().await;
    let view = state.renderer.handle(&mut session, action).await?;
    Ok(Json(view))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.sessions.len().await,
    })
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, handle) = state.sessions.create().await;
    let view = state.renderer.render(&*handle.lock().await);
    (StatusCode::CREATED, Json(SessionResponse { session_id, view }))
}

async fn show_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<View>, ApiError> {
    dispatch(&state, id, Action::Refresh).await
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StudioError::SessionNotFound(id).into())
    }
}

async fn continue_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<View>, ApiError> {
    dispatch(&state, id, Action::Continue).await
}

async fn select_screen(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<ScreenPayload>,
) -> Result<Json<View>, ApiError> {
    dispatch(&state, id, Action::SelectScreen(payload.screen)).await
}

async fn select_task(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<View>, ApiError> {
    dispatch(&state, id, Action::SelectTask(payload.task)).await
}

async fn submit_chat(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<View>, ApiError> {
    dispatch(&state, id, Action::SubmitChat { input: payload.input }).await
}

async fn ask_pdf(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    mut multipart: Multipart,
) -> Result<Json<View>, ApiError> {
    let mut pdf = None;
    let mut question = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid upload: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid PDF upload: {}", e)))?;
                log::info!("Received PDF upload of {} bytes", bytes.len());
                pdf = Some(bytes.to_vec());
            }
            Some("question") => {
                question = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid question: {}", e)))?;
            }
            _ => {}
        }
    }

    dispatch(&state, id, Action::AskPdf { pdf, question }).await
}
