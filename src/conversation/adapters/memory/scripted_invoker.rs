//! Participant invoker that replays scripted outputs.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::conversation::domain::{ParticipantName, TranscriptEntry};
use crate::conversation::ports::invoker::{
    InvocationError, InvocationRequest, InvocationResult, ParticipantInvoker,
};

/// One recorded call to [`ScriptedInvoker::invoke`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    /// Participant that was run.
    pub participant: ParticipantName,
    /// Instructions it was given.
    pub instructions: String,
    /// Transcript it saw.
    pub input: Vec<TranscriptEntry>,
}

#[derive(Debug, Default)]
struct Script {
    queued: HashMap<ParticipantName, VecDeque<InvocationResult<String>>>,
    repeating: HashMap<ParticipantName, String>,
    calls: Vec<RecordedInvocation>,
}

/// [`ParticipantInvoker`] that returns queued outputs per participant and
/// records every call.
///
/// Queued outputs are consumed first; after that a repeating output, if set,
/// is returned indefinitely. A participant with nothing left fails with
/// [`InvocationError::Unknown`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedInvoker {
    script: Arc<Mutex<Script>>,
}

impl ScriptedInvoker {
    /// Creates an invoker with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an output for `participant`.
    pub fn push_output(&self, participant: &ParticipantName, output: impl Into<String>) {
        self.push(participant, Ok(output.into()));
    }

    /// Queues a failure for `participant`.
    pub fn push_error(&self, participant: &ParticipantName, error: InvocationError) {
        self.push(participant, Err(error));
    }

    /// Sets an output returned whenever the queue for `participant` is empty.
    pub fn repeat_output(&self, participant: &ParticipantName, output: impl Into<String>) {
        if let Ok(mut script) = self.script.lock() {
            script.repeating.insert(participant.clone(), output.into());
        }
    }

    /// Returns every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedInvocation> {
        self.script
            .lock()
            .map(|script| script.calls.clone())
            .unwrap_or_default()
    }

    /// Returns the number of calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.script
            .lock()
            .map(|script| script.calls.len())
            .unwrap_or(0)
    }

    fn push(&self, participant: &ParticipantName, output: InvocationResult<String>) {
        if let Ok(mut script) = self.script.lock() {
            script
                .queued
                .entry(participant.clone())
                .or_default()
                .push_back(output);
        }
    }
}

#[async_trait]
impl ParticipantInvoker for ScriptedInvoker {
    async fn invoke(&self, request: InvocationRequest<'_>) -> InvocationResult<String> {
        let name = request.participant.name();
        let mut script = self
            .script
            .lock()
            .map_err(|err| InvocationError::Unknown(err.to_string()))?;

        script.calls.push(RecordedInvocation {
            participant: name.clone(),
            instructions: request.instructions.to_owned(),
            input: request.input.to_vec(),
        });

        if let Some(output) = script.queued.get_mut(name).and_then(VecDeque::pop_front) {
            return output;
        }
        script
            .repeating
            .get(name)
            .cloned()
            .ok_or_else(|| InvocationError::Unknown(format!("no scripted output for {name}")))
    }
}
