//! Conversion of turn outcomes into server-sent events.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use futures::stream::{self, StreamExt};
use serde_json::json;

use crate::conversation::domain::{ParticipantName, ReplyKind, TurnOutcome};

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// One event in a reply stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A participant silently handed the conversation to another.
    Handoff {
        /// Participant that finished.
        from: ParticipantName,
        /// Participant that took over.
        to: ParticipantName,
    },
    /// A reply begins.
    MessageStart {
        /// Participant answering, if any.
        participant: Option<ParticipantName>,
    },
    /// A chunk of reply text.
    Delta {
        /// Text chunk, including trailing whitespace.
        text: String,
    },
    /// The turn failed; the reply text explains why.
    Error {
        /// User-facing message.
        message: String,
    },
    /// The reply is complete.
    MessageComplete {
        /// Reply classification.
        kind: ReplyKind,
        /// Participant to send back as `last_participant_name`.
        next_participant: Option<ParticipantName>,
    },
}

impl StreamEvent {
    /// Returns the SSE event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Handoff { .. } => "handoff",
            Self::MessageStart { .. } => "message_start",
            Self::Delta { .. } => "delta",
            Self::Error { .. } => "error",
            Self::MessageComplete { .. } => "message_complete",
        }
    }

    /// Returns the JSON payload.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::Handoff { from, to } => json!({ "type": "handoff", "from": from, "to": to }),
            Self::MessageStart { participant } => {
                json!({ "type": "message_start", "participant": participant })
            }
            Self::Delta { text } => json!({ "type": "delta", "text": text }),
            Self::Error { message } => json!({ "type": "error", "message": message }),
            Self::MessageComplete {
                kind,
                next_participant,
            } => json!({
                "type": "message_complete",
                "kind": kind,
                "next_participant": next_participant,
            }),
        }
    }

    fn into_event(self) -> Event {
        Event::default()
            .event(self.name())
            .data(self.payload().to_string())
    }
}

/// Returns the events that stream `outcome` to the client.
#[must_use]
pub fn outcome_events(outcome: &TurnOutcome) -> Vec<StreamEvent> {
    let mut events: Vec<StreamEvent> = outcome
        .handoffs
        .iter()
        .map(|handoff| StreamEvent::Handoff {
            from: handoff.from.clone(),
            to: handoff.to.clone(),
        })
        .collect();

    events.push(StreamEvent::MessageStart {
        participant: outcome.reply.participant.clone(),
    });
    events.extend(
        outcome
            .reply
            .text
            .split_inclusive(char::is_whitespace)
            .map(|chunk| StreamEvent::Delta {
                text: chunk.to_owned(),
            }),
    );
    if outcome.reply.kind == ReplyKind::Error {
        events.push(StreamEvent::Error {
            message: outcome.reply.text.clone(),
        });
    }
    events.push(StreamEvent::MessageComplete {
        kind: outcome.reply.kind,
        next_participant: outcome.next_participant.clone(),
    });
    events
}

/// Streams the reply of a turn that has not run yet.
///
/// The turn future is polled only once the client starts reading, and is
/// dropped with the stream if the client disconnects.
pub fn turn_stream<F>(turn: F) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    F: Future<Output = Vec<StreamEvent>> + Send + 'static,
{
    let events = stream::once(turn)
        .flat_map(stream::iter)
        .map(|event| Ok(event.into_event()));
    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("ping"),
    )
}
