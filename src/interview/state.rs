//! Conversation state — transcript, collected answers, and step tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Who produced a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
    Receptionist,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Receptionist => "receptionist",
        };
        write!(f, "{s}")
    }
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text)
    }

    pub fn receptionist(text: impl Into<String>) -> Self {
        Self::new(Speaker::Receptionist, text)
    }
}

/// Coerced answers keyed by field key. Accumulated monotonically as steps
/// advance; cleared only by a full reset.
pub type AnswerRecord = serde_json::Map<String, Value>;

/// Live state of one interview session.
///
/// Mutated exclusively through [`super::ConversationEngine`]; replaced
/// wholesale on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Session identifier.
    pub id: Uuid,
    /// Index into the field schema; equal to the field count when done.
    pub step: usize,
    /// Consecutive invalid answers for the *current* step only.
    pub attempts: u32,
    /// Answers collected so far.
    pub record: AnswerRecord,
    /// Append-only transcript (except on reset).
    pub transcript: Vec<Message>,
}

impl ConversationState {
    /// Fresh state: step 0, no attempts, empty record, a single greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            step: 0,
            attempts: 0,
            record: AnswerRecord::new(),
            transcript: vec![Message::assistant(greeting)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.transcript.push(message);
    }

    /// Record an accepted answer and move to the next step.
    ///
    /// Attempts are scoped to a single step, so they zero out here.
    pub fn accept(&mut self, key: &str, value: Value) {
        self.record.insert(key.to_string(), value);
        self.attempts = 0;
        self.step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_state_shape() {
        let state = ConversationState::new("Welcome aboard!");
        assert_eq!(state.step, 0);
        assert_eq!(state.attempts, 0);
        assert!(state.record.is_empty());
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].speaker, Speaker::Assistant);
        assert_eq!(state.transcript[0].text, "Welcome aboard!");
    }

    #[test]
    fn accept_records_and_advances() {
        let mut state = ConversationState::new("hi");
        state.attempts = 2;
        state.accept("name", json!("Alice"));
        assert_eq!(state.step, 1);
        assert_eq!(state.attempts, 0, "attempts reset on accept");
        assert_eq!(state.record["name"], "Alice");
    }

    #[test]
    fn transcript_appends_in_order() {
        let mut state = ConversationState::new("hi");
        state.push(Message::user("Alice"));
        state.push(Message::receptionist("try again"));
        state.push(Message::assistant("What's your name?"));
        let speakers: Vec<Speaker> = state.transcript.iter().map(|m| m.speaker).collect();
        assert_eq!(
            speakers,
            vec![
                Speaker::Assistant,
                Speaker::User,
                Speaker::Receptionist,
                Speaker::Assistant
            ]
        );
    }

    #[test]
    fn serde_roundtrip() {
        let mut state = ConversationState::new("hi");
        state.accept("class", json!(1));
        state.push(Message::user("1"));

        let json = serde_json::to_string(&state).unwrap();
        let parsed: ConversationState = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, state.id);
        assert_eq!(parsed.step, 1);
        assert_eq!(parsed.record["class"], 1);
        assert_eq!(parsed.transcript.len(), 2);
    }

    #[test]
    fn display_matches_serde() {
        for speaker in [Speaker::User, Speaker::Assistant, Speaker::Receptionist] {
            let display = format!("{speaker}");
            let json = serde_json::to_string(&speaker).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }
}
