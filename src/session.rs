//! ChatSession — wires the engine to the external services, one turn at a
//! time.
//!
//! The session owns the single live [`ConversationEngine`] and is the only
//! caller of its `complete_*` methods. One submission is fully processed,
//! including the awaited service call, before the next is accepted; the
//! `&mut self` receiver enforces that turns never interleave.

use std::sync::Arc;

use crate::interview::{ConversationEngine, Message, Turn};
use crate::services::{Predictor, Receptionist};

/// One live conversation bound to its services.
pub struct ChatSession {
    engine: ConversationEngine,
    predictor: Arc<dyn Predictor>,
    receptionist: Option<Arc<dyn Receptionist>>,
}

impl ChatSession {
    pub fn new(
        engine: ConversationEngine,
        predictor: Arc<dyn Predictor>,
        receptionist: Option<Arc<dyn Receptionist>>,
    ) -> Self {
        Self {
            engine,
            predictor,
            receptionist,
        }
    }

    /// Feed one line of user input through the engine, performing whatever
    /// service call the turn requires. Returns the messages appended by
    /// this turn (the whole transcript after a reset).
    pub async fn handle_line(&mut self, line: &str) -> Vec<Message> {
        let before = self.engine.transcript().len();

        match self.engine.submit(line) {
            Turn::Ignored | Turn::Prompt => {}
            Turn::Reset => {
                // Transcript was replaced; report all of it.
                return self.engine.transcript().to_vec();
            }
            Turn::NeedsClarification {
                token, question, ..
            } => {
                let reply = match &self.receptionist {
                    Some(receptionist) => Some(receptionist.clarify(&question).await),
                    None => None,
                };
                self.engine.complete_clarification(token, reply);
            }
            Turn::Finalize { token, record } => {
                let result = self.predictor.predict(&record).await;
                self.engine.complete_prediction(token, result);
            }
        }

        self.engine.transcript()[before..].to_vec()
    }

    /// Explicit user-triggered reset; returns the fresh transcript.
    pub fn reset(&mut self, message: Option<String>) -> Vec<Message> {
        self.engine.reset(message);
        self.engine.transcript().to_vec()
    }

    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    pub fn current_prompt(&self) -> Option<&str> {
        self.engine.current_prompt()
    }

    pub fn transcript(&self) -> &[Message] {
        self.engine.transcript()
    }
}
