//! ConversationEngine — the interview state machine.
//!
//! The engine is the sole authority over dialogue progress: it decides
//! whether an answer advances the interview, triggers a retry, wipes the
//! conversation, or hands the completed record to the predictor. It is
//! deliberately synchronous; the async service calls happen in the caller
//! (see [`crate::session::ChatSession`]), which reports their outcome back
//! through the `complete_*` methods using the [`TurnToken`] issued with the
//! turn.

use crate::config::ChatConfig;
use crate::error::{PredictorError, ReceptionistError};
use crate::services::Prediction;

use super::fields::{FieldSpec, ValidationResult, passenger_fields};
use super::prompts;
use super::state::{AnswerRecord, ConversationState, Message};

/// Identifies the turn a deferred service completion belongs to.
///
/// A token is only honored while the engine is still on the same step of
/// the same conversation generation; anything else is a stale response
/// (e.g. a receptionist reply arriving after a reset) and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnToken {
    generation: u64,
    step: usize,
}

/// The effect of one submission, for the caller to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// Empty/whitespace input, or input after the interview finished.
    /// Nothing changed.
    Ignored,
    /// Answer accepted; the next question is already in the transcript.
    Prompt,
    /// Answer rejected. The caller may consult the receptionist with
    /// `question`, then must call
    /// [`ConversationEngine::complete_clarification`].
    NeedsClarification {
        token: TurnToken,
        question: String,
        error: String,
    },
    /// Attempt limit reached; the conversation was wiped to a fresh start.
    Reset,
    /// All fields collected. The caller must run the predictor exactly once
    /// on `record`, then call [`ConversationEngine::complete_prediction`].
    Finalize {
        token: TurnToken,
        record: AnswerRecord,
    },
}

/// Turn-based interview state machine over a fixed field schema.
pub struct ConversationEngine {
    fields: Vec<FieldSpec>,
    max_attempts: u32,
    greeting: String,
    state: ConversationState,
    /// Bumped on every reset so tokens from a wiped conversation die.
    generation: u64,
}

impl ConversationEngine {
    pub fn new(fields: Vec<FieldSpec>, max_attempts: u32, greeting: impl Into<String>) -> Self {
        debug_assert!(max_attempts > 0);
        debug_assert!(!fields.is_empty());
        debug_assert!(
            {
                let keys: std::collections::HashSet<&str> =
                    fields.iter().map(|f| f.key).collect();
                keys.len() == fields.len()
            },
            "field keys must be unique"
        );
        let greeting = greeting.into();
        let state = ConversationState::new(&greeting);
        Self {
            fields,
            max_attempts,
            greeting,
            state,
            generation: 0,
        }
    }

    /// Engine over the standard passenger schema, configured per `config`.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(
            passenger_fields(config.fare_cap),
            config.max_attempts,
            config.greeting.clone(),
        )
    }

    /// Process one raw submission and return the transition for the caller
    /// to act on.
    pub fn submit(&mut self, raw: &str) -> Turn {
        let raw = raw.trim();
        if raw.is_empty() || self.is_done() {
            // Defensive: the caller shouldn't submit either of these.
            return Turn::Ignored;
        }

        self.state.push(Message::user(raw));
        let field = &self.fields[self.state.step];

        match field.validate(raw) {
            ValidationResult::Invalid(error) => {
                self.state.attempts += 1;
                tracing::debug!(
                    field = field.key,
                    attempts = self.state.attempts,
                    "invalid answer"
                );
                if self.state.attempts >= self.max_attempts {
                    self.wipe(prompts::RESET_NOTICE);
                    return Turn::Reset;
                }
                Turn::NeedsClarification {
                    token: self.token(),
                    question: raw.to_string(),
                    error,
                }
            }
            ValidationResult::Valid(value) => {
                let key = field.key;
                self.state.accept(key, value);
                tracing::debug!(field = key, step = self.state.step, "answer accepted");
                if self.is_done() {
                    Turn::Finalize {
                        token: self.token(),
                        record: self.state.record.clone(),
                    }
                } else {
                    let next = &self.fields[self.state.step];
                    let text = prompts::advance_text(next, &self.state.record);
                    self.state.push(Message::assistant(text));
                    Turn::Prompt
                }
            }
        }
    }

    /// Report the receptionist's reply for a [`Turn::NeedsClarification`].
    ///
    /// `reply` is `None` when no receptionist is configured, `Some(Err(_))`
    /// when the call failed (degrades to a canned substitute). Appends the
    /// restated prompt either way. Returns `false` if the token was stale
    /// and nothing was appended.
    pub fn complete_clarification(
        &mut self,
        token: TurnToken,
        reply: Option<Result<String, ReceptionistError>>,
    ) -> bool {
        if token != self.token() || self.is_done() {
            tracing::debug!("discarding stale clarification");
            return false;
        }
        match reply {
            Some(Ok(answer)) => self.state.push(Message::receptionist(answer)),
            Some(Err(e)) => {
                tracing::warn!("receptionist call failed: {e}");
                self.state
                    .push(Message::receptionist(prompts::RECEPTIONIST_UNAVAILABLE));
            }
            None => {}
        }
        let field = &self.fields[self.state.step];
        let text = prompts::retry_prompt(
            &field.error,
            self.state.attempts,
            self.max_attempts,
            &field.prompt,
        );
        self.state.push(Message::assistant(text));
        true
    }

    /// Report the predictor's outcome for a [`Turn::Finalize`].
    ///
    /// On success the structured verdict is rendered into the transcript;
    /// on failure a single generic message is appended. The conversation is
    /// terminal either way — the predictor is never retried. Returns
    /// `false` if the token was stale.
    pub fn complete_prediction(
        &mut self,
        token: TurnToken,
        result: Result<Prediction, PredictorError>,
    ) -> bool {
        if token != self.token() || !self.is_done() {
            tracing::debug!("discarding stale prediction");
            return false;
        }
        match result {
            Ok(prediction) => {
                for line in prompts::render_prediction(&prediction) {
                    self.state.push(Message::assistant(line));
                }
            }
            Err(e) => {
                tracing::warn!("predictor call failed: {e}");
                self.state.push(Message::assistant(prompts::PREDICTOR_FAILURE));
            }
        }
        true
    }

    /// Explicit reset, available from any state. `message` overrides the
    /// configured greeting for the fresh transcript.
    pub fn reset(&mut self, message: Option<String>) {
        let greeting = message.unwrap_or_else(|| self.greeting.clone());
        self.wipe(&greeting);
    }

    fn wipe(&mut self, greeting: &str) {
        self.generation += 1;
        self.state = ConversationState::new(greeting);
        tracing::debug!(generation = self.generation, "conversation reset");
    }

    fn token(&self) -> TurnToken {
        TurnToken {
            generation: self.generation,
            step: self.state.step,
        }
    }

    /// Whether every field has been collected.
    pub fn is_done(&self) -> bool {
        self.state.step >= self.fields.len()
    }

    /// The pending question, or `None` once the interview is done.
    pub fn current_prompt(&self) -> Option<&str> {
        self.fields.get(self.state.step).map(|f| f.prompt.as_str())
    }

    pub fn transcript(&self) -> &[Message] {
        &self.state.transcript
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
