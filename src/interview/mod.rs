//! Interview system — the conversational survival questionnaire.
//!
//! The interview is a structured conversation between the assistant and a
//! passenger. The engine walks a fixed, ordered field schema, validating
//! each answer and retrying invalid ones up to a bounded attempt limit.
//! Once every field is collected, the completed record is handed to the
//! survival predictor and the verdict is rendered into the transcript.

pub mod engine;
pub mod fields;
pub mod prompts;
pub mod state;

pub use engine::{ConversationEngine, Turn, TurnToken};
pub use fields::{FieldRule, FieldSpec, ValidationResult, passenger_fields};
pub use state::{AnswerRecord, ConversationState, Message, Speaker};
