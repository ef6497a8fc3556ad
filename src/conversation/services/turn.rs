//! Turn controller: drives one user turn through the participant chain.
//!
//! A turn starts either from a registration code (first message of a
//! session) or from the participant that answered the previous turn. The
//! controller then invokes participants in sequence. When a participant
//! reports its task complete and names a different participant, the
//! controller hides the output, appends a synthesized summary addressed to
//! the next participant, and invokes it within the same turn. Otherwise the
//! participant's `response_text` is surfaced and the participant is recorded
//! as the one to resume with.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::conversation::domain::{
    HandoffRecord, HandoffSignal, InstructionContext, OutputProtocol, ParticipantDefinition,
    ParticipantName, Reply, ReplyKind, Transcript, TranscriptEntry, TurnOutcome, TurnRequest,
};
use crate::conversation::error::TurnError;
use crate::conversation::ports::invoker::{InvocationRequest, ParticipantInvoker};
use crate::conversation::ports::registry::ParticipantRegistry;
use crate::registration::domain::CodeType;
use crate::registration::validator::validate_registration_code;

use super::instructions::render_instructions;

/// Silent handoffs allowed in one turn unless configured otherwise.
pub const DEFAULT_MAX_HANDOFF_CHAIN: usize = 10;

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSettings {
    new_registration: ParticipantName,
    renewal: ParticipantName,
    max_handoff_chain: usize,
}

impl TurnSettings {
    /// Creates settings naming the starting participant for each code type.
    #[must_use]
    pub const fn new(new_registration: ParticipantName, renewal: ParticipantName) -> Self {
        Self {
            new_registration,
            renewal,
            max_handoff_chain: DEFAULT_MAX_HANDOFF_CHAIN,
        }
    }

    /// Sets the maximum number of silent handoffs per turn.
    #[must_use]
    pub const fn with_max_handoff_chain(mut self, max_handoff_chain: usize) -> Self {
        self.max_handoff_chain = max_handoff_chain;
        self
    }

    /// Returns the participant that starts a registration of `code_type`.
    #[must_use]
    pub const fn starting_participant(&self, code_type: CodeType) -> &ParticipantName {
        match code_type {
            CodeType::NewRegistration => &self.new_registration,
            CodeType::RenewalRegistration => &self.renewal,
        }
    }

    /// Returns the maximum number of silent handoffs per turn.
    #[must_use]
    pub const fn max_handoff_chain(&self) -> usize {
        self.max_handoff_chain
    }
}

/// Result of a turn that reached a surfaced reply.
struct Surfaced {
    text: String,
    participant: ParticipantName,
    handoffs: Vec<HandoffRecord>,
}

/// Runs user turns against a participant registry and invoker.
pub struct TurnController<R, I>
where
    R: ParticipantRegistry,
    I: ParticipantInvoker,
{
    registry: Arc<R>,
    invoker: Arc<I>,
    settings: TurnSettings,
}

impl<R, I> TurnController<R, I>
where
    R: ParticipantRegistry,
    I: ParticipantInvoker,
{
    /// Creates a controller.
    pub const fn new(registry: Arc<R>, invoker: Arc<I>, settings: TurnSettings) -> Self {
        Self {
            registry,
            invoker,
            settings,
        }
    }

    /// Returns the controller settings.
    #[must_use]
    pub const fn settings(&self) -> &TurnSettings {
        &self.settings
    }

    /// Returns the participant registry.
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Runs one turn.
    ///
    /// Never fails: every error ends the turn with a single assistant entry
    /// carrying a user-facing message. The returned delta always begins with
    /// the user message. After a recoverable error the participant the turn
    /// started with is kept, so the next message retries with it; an invalid
    /// code or unknown participant clears it.
    pub async fn run_turn(&self, request: &TurnRequest) -> TurnOutcome {
        let mut delta = Transcript::new();
        delta.push(TranscriptEntry::user(request.user_message.as_str()));

        let (participant, context) = match self.resolve_start(request) {
            Ok(start) => start,
            Err(err) => return Self::fail(delta, &err, None),
        };
        let starter = participant.name().clone();

        match self.drive(request, participant, context, &mut delta).await {
            Ok(surfaced) => {
                info!(
                    participant = %surfaced.participant,
                    handoffs = surfaced.handoffs.len(),
                    "turn completed"
                );
                TurnOutcome {
                    delta,
                    reply: Reply {
                        kind: ReplyKind::Response,
                        text: surfaced.text,
                        participant: Some(surfaced.participant.clone()),
                    },
                    next_participant: Some(surfaced.participant),
                    handoffs: surfaced.handoffs,
                }
            }
            Err(err) => Self::fail(delta, &err, Some(starter)),
        }
    }

    fn fail(
        mut delta: Transcript,
        err: &TurnError,
        starter: Option<ParticipantName>,
    ) -> TurnOutcome {
        let kind = if matches!(err, TurnError::InvalidCode(_)) {
            info!(error = %err, "registration code rejected");
            ReplyKind::Rejection
        } else {
            warn!(error = %err, "turn failed");
            ReplyKind::Error
        };
        let text = err.user_message();
        delta.truncate(1);
        delta.push(TranscriptEntry::assistant(text.as_str()));
        TurnOutcome {
            delta,
            reply: Reply {
                kind,
                text,
                participant: None,
            },
            next_participant: starter.filter(|_| err.is_recoverable()),
            handoffs: Vec::new(),
        }
    }

    async fn drive(
        &self,
        request: &TurnRequest,
        mut participant: Arc<ParticipantDefinition>,
        mut context: InstructionContext,
        delta: &mut Transcript,
    ) -> Result<Surfaced, TurnError> {
        let mut input = request.history.clone();
        input.extend_from(delta);

        let mut handoffs = Vec::new();
        loop {
            let signal = self.invoke(&participant, &context, &input, delta).await?;

            let Some(target) = signal.handoff_target(participant.name()) else {
                return Ok(Surfaced {
                    text: signal.response_text().to_owned(),
                    participant: participant.name().clone(),
                    handoffs,
                });
            };

            if handoffs.len() >= self.settings.max_handoff_chain {
                return Err(TurnError::HandoffChainOverflow {
                    limit: self.settings.max_handoff_chain,
                });
            }

            let next = self
                .registry
                .find(target)
                .ok_or_else(|| TurnError::UnknownParticipant(target.as_str().to_owned()))?;

            info!(from = %participant.name(), to = %next.name(), "silent handoff");
            let summary = TranscriptEntry::user(handoff_summary(
                participant.name(),
                next.name(),
                signal.response_text(),
            ));
            delta.push(summary.clone());
            input = Transcript::from(vec![summary]);
            context.clear_seed();
            handoffs.push(HandoffRecord {
                from: participant.name().clone(),
                to: next.name().clone(),
            });
            participant = next;
        }
    }

    fn resolve_start(
        &self,
        request: &TurnRequest,
    ) -> Result<(Arc<ParticipantDefinition>, InstructionContext), TurnError> {
        if request.is_session_start() {
            let details = validate_registration_code(&request.user_message)
                .into_result()
                .map_err(TurnError::InvalidCode)?;
            let name = self.settings.starting_participant(details.code_type());
            info!(
                code_type = %details.code_type(),
                team = %details.team_name(),
                participant = %name,
                "registration code accepted"
            );
            let participant = self
                .registry
                .find(name)
                .ok_or_else(|| TurnError::UnknownParticipant(name.as_str().to_owned()))?;
            return Ok((participant, InstructionContext::seeded(&details)));
        }

        let raw_name = request.last_participant_name.as_deref().unwrap_or_default();
        let participant = ParticipantName::new(raw_name)
            .ok()
            .and_then(|name| self.registry.find(&name))
            .ok_or_else(|| TurnError::UnknownParticipant(raw_name.to_owned()))?;
        Ok((participant, InstructionContext::unseeded()))
    }

    async fn invoke(
        &self,
        participant: &ParticipantDefinition,
        context: &InstructionContext,
        input: &Transcript,
        delta: &mut Transcript,
    ) -> Result<HandoffSignal, TurnError> {
        let instructions =
            render_instructions(participant.instructions_template(), context).map_err(
                |source| TurnError::Instructions {
                    participant: participant.name().clone(),
                    source,
                },
            )?;

        debug!(participant = %participant.name(), input_len = input.len(), "invoking participant");
        let raw_output = self
            .invoker
            .invoke(InvocationRequest::new(
                participant,
                &instructions,
                input.entries(),
            ))
            .await
            .map_err(|source| TurnError::Upstream {
                participant: participant.name().clone(),
                source,
            })?;
        delta.push(TranscriptEntry::assistant(raw_output.as_str()));

        match participant.output_protocol() {
            OutputProtocol::Structured => {
                HandoffSignal::parse(&raw_output).map_err(|source| TurnError::OutputParse {
                    participant: participant.name().clone(),
                    source,
                })
            }
            OutputProtocol::FreeText => Ok(HandoffSignal::from_free_text(&raw_output)),
        }
    }
}

fn handoff_summary(from: &ParticipantName, to: &ParticipantName, response_text: &str) -> String {
    format!(
        "[Handoff from {from} to {to}] {from} has completed its task and reported: \
         {response_text}\nPlease continue the registration from here."
    )
}
