//! HTTP handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::conversation::domain::{ParticipantName, SessionId, SessionState, Transcript, TurnRequest};
use crate::conversation::error::ConversationError;
use crate::conversation::ports::invoker::ParticipantInvoker;
use crate::conversation::ports::registry::ParticipantRegistry;
use crate::conversation::ports::session_store::SessionStore;

use super::AppState;
use super::sse::{StreamEvent, outcome_events, turn_stream};

/// Body of `POST /sessions/{id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageBody {
    /// The user's message.
    pub message: String,
}

/// Public view of a stored session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Session identifier.
    pub session_id: SessionId,
    /// Transcript so far.
    pub transcript: Transcript,
    /// Participant that resumes on the next message.
    pub next_participant: Option<ParticipantName>,
}

impl From<SessionState> for SessionView {
    fn from(session: SessionState) -> Self {
        Self {
            session_id: session.id,
            transcript: session.transcript,
            next_participant: session.next_participant,
        }
    }
}

/// JSON error response.
#[derive(Debug)]
pub enum ApiError {
    /// The path did not contain a valid session ID.
    BadSessionId(String),
    /// The session does not exist.
    NotFound(SessionId),
    /// Storage failed.
    Internal(String),
}

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        match err {
            ConversationError::SessionNotFound(id) => Self::NotFound(id),
            ConversationError::Store(store) => Self::Internal(store.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadSessionId(raw) => (
                StatusCode::BAD_REQUEST,
                format!("invalid session id: {raw}"),
            ),
            Self::NotFound(id) => (StatusCode::NOT_FOUND, format!("session not found: {id}")),
            Self::Internal(detail) => {
                error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadSessionId(raw.to_owned()))
}

pub(super) async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn chat_stream<S, R, I, K>(
    State(state): State<AppState<S, R, I, K>>,
    Json(request): Json<TurnRequest>,
) -> Response
where
    S: SessionStore + 'static,
    R: ParticipantRegistry + 'static,
    I: ParticipantInvoker + 'static,
    K: Clock + Send + Sync + 'static,
{
    turn_stream(async move {
        let outcome = state.service.controller().run_turn(&request).await;
        outcome_events(&outcome)
    })
    .into_response()
}

pub(super) async fn create_session<S, R, I, K>(
    State(state): State<AppState<S, R, I, K>>,
) -> Result<(StatusCode, Json<SessionView>), ApiError>
where
    S: SessionStore + 'static,
    R: ParticipantRegistry + 'static,
    I: ParticipantInvoker + 'static,
    K: Clock + Send + Sync + 'static,
{
    let session = state.service.create_session().await?;
    Ok((StatusCode::CREATED, Json(SessionView::from(session))))
}

pub(super) async fn get_session<S, R, I, K>(
    State(state): State<AppState<S, R, I, K>>,
    Path(raw_id): Path<String>,
) -> Result<Json<SessionView>, ApiError>
where
    S: SessionStore + 'static,
    R: ParticipantRegistry + 'static,
    I: ParticipantInvoker + 'static,
    K: Clock + Send + Sync + 'static,
{
    let id = parse_session_id(&raw_id)?;
    let session = state.service.session(id).await?;
    Ok(Json(SessionView::from(session)))
}

pub(super) async fn send_message<S, R, I, K>(
    State(state): State<AppState<S, R, I, K>>,
    Path(raw_id): Path<String>,
    Json(body): Json<SendMessageBody>,
) -> Result<Response, ApiError>
where
    S: SessionStore + 'static,
    R: ParticipantRegistry + 'static,
    I: ParticipantInvoker + 'static,
    K: Clock + Send + Sync + 'static,
{
    let id = parse_session_id(&raw_id)?;
    state.service.session(id).await?;

    info!(session_id = %id, "message received");
    Ok(turn_stream(async move {
        match state.service.send_message(id, &body.message).await {
            Ok(outcome) => outcome_events(&outcome),
            Err(err) => {
                error!(session_id = %id, error = %err, "session turn failed");
                vec![
                    StreamEvent::MessageStart { participant: None },
                    StreamEvent::Error {
                        message: "Sorry, your conversation could not be saved. Please try again."
                            .to_owned(),
                    },
                    StreamEvent::MessageComplete {
                        kind: crate::conversation::domain::ReplyKind::Error,
                        next_participant: None,
                    },
                ]
            }
        }
    })
    .into_response())
}
