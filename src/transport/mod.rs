//! HTTP and server-sent-events transport.
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `GET` | `/health` | | `{"status": "ok"}` |
//! | `POST` | `/chat/stream` | [`TurnRequest`](crate::conversation::domain::TurnRequest) | SSE |
//! | `POST` | `/sessions` | | session JSON |
//! | `GET` | `/sessions/{id}` | | session JSON |
//! | `POST` | `/sessions/{id}/messages` | `{"message": "..."}` | SSE |
//!
//! Each reply is streamed as `message_start`, one `delta` per word,
//! `message_complete`; silent handoffs are announced with `handoff` events
//! and failed turns add an `error` event inside the bracket.

mod handlers;
mod sse;

use axum::Router;
use axum::routing::{get, post};
use mockable::Clock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::conversation::ports::invoker::ParticipantInvoker;
use crate::conversation::ports::registry::ParticipantRegistry;
use crate::conversation::ports::session_store::SessionStore;
use crate::conversation::services::ConversationService;

pub use handlers::{ApiError, SendMessageBody, SessionView};
pub use sse::{StreamEvent, outcome_events};

/// Shared handler state.
pub struct AppState<S, R, I, K>
where
    S: SessionStore,
    R: ParticipantRegistry,
    I: ParticipantInvoker,
    K: Clock + Send + Sync,
{
    /// Conversation service, which also owns the turn controller.
    pub service: ConversationService<S, R, I, K>,
}

impl<S, R, I, K> Clone for AppState<S, R, I, K>
where
    S: SessionStore,
    R: ParticipantRegistry,
    I: ParticipantInvoker,
    K: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// Builds the application router.
pub fn router<S, R, I, K>(service: ConversationService<S, R, I, K>) -> Router
where
    S: SessionStore + 'static,
    R: ParticipantRegistry + 'static,
    I: ParticipantInvoker + 'static,
    K: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route("/chat/stream", post(handlers::chat_stream::<S, R, I, K>))
        .route("/sessions", post(handlers::create_session::<S, R, I, K>))
        .route("/sessions/:id", get(handlers::get_session::<S, R, I, K>))
        .route(
            "/sessions/:id/messages",
            post(handlers::send_message::<S, R, I, K>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
}
