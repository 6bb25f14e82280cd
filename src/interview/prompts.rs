//! Canned interview copy — greeting, retry prompts, and verdict rendering.

use super::fields::FieldSpec;
use super::state::AnswerRecord;
use crate::services::Prediction;

/// Greeting that opens a brand-new conversation.
pub const DEFAULT_GREETING: &str =
    "Hello! I'm Rose, your Titanic receptionist. To begin, please tell me your name.";

/// Shown when the attempt limit wipes the conversation.
pub const RESET_NOTICE: &str = "Too many invalid attempts. Let's start over.";

/// Substitute for a failed or absent receptionist reply.
pub const RECEPTIONIST_UNAVAILABLE: &str = "Receptionist unavailable. Let's continue.";

/// Shown when the final prediction call fails.
pub const PREDICTOR_FAILURE: &str = "Error contacting the prediction service.";

/// Restated question after an invalid answer, annotated with the attempt
/// count, e.g. `"Please enter C, Q, or S. (attempt 2/3) What is your port
/// of embarkation? (C, Q, S)"`.
pub fn retry_prompt(error: &str, attempt: u32, max: u32, prompt: &str) -> String {
    format!("{error} (attempt {attempt}/{max}) {prompt}")
}

/// Question for the next field after an accepted answer.
///
/// The first advance gets a personal touch once the passenger's name is
/// known; every later one is just the next question.
pub fn advance_text(next: &FieldSpec, record: &AnswerRecord) -> String {
    if next.key == "class" {
        if let Some(name) = record.get("name").and_then(|v| v.as_str()) {
            return format!("Nice to meet you, {name}! {}", next.prompt);
        }
    }
    next.prompt.clone()
}

/// Render the predictor's verdict as a sequence of assistant messages.
pub fn render_prediction(prediction: &Prediction) -> Vec<String> {
    let verdict = if prediction.survived() {
        "✅ Survived"
    } else {
        "❌ Did not survive"
    };
    let percent = (prediction.survival_probability * 100.0).round();
    vec![
        format!("Prediction: {verdict} (Probability: {percent:.0}%)"),
        format!("Reason: {}", prediction.explanation.reason),
        format!("Suggestion: {}", prediction.explanation.suggestion),
        format!("Fact: {}", prediction.explanation.fact),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::fields::passenger_fields;
    use crate::services::Explanation;
    use serde_json::json;

    #[test]
    fn retry_prompt_carries_attempt_count() {
        let text = retry_prompt("Please enter C, Q, or S.", 2, 3, "Port?");
        assert_eq!(text, "Please enter C, Q, or S. (attempt 2/3) Port?");
    }

    #[test]
    fn first_advance_greets_by_name() {
        let fields = passenger_fields(Some(512.0));
        let mut record = AnswerRecord::new();
        record.insert("name".into(), json!("Alice"));
        let text = advance_text(&fields[1], &record);
        assert!(text.starts_with("Nice to meet you, Alice!"));
        assert!(text.contains("Which class are you traveling in?"));
    }

    #[test]
    fn later_advances_are_plain_prompts() {
        let fields = passenger_fields(Some(512.0));
        let record = AnswerRecord::new();
        assert_eq!(advance_text(&fields[3], &record), "What is your age?");
    }

    #[test]
    fn verdict_renders_four_messages() {
        let prediction = Prediction {
            prediction: 1,
            survival_probability: 0.847,
            explanation: Explanation {
                reason: "First class, female.".into(),
                suggestion: "Stay near the lifeboats.".into(),
                fact: "Women survived at far higher rates.".into(),
            },
        };
        let lines = render_prediction(&prediction);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Prediction: ✅ Survived (Probability: 85%)");
        assert_eq!(lines[1], "Reason: First class, female.");
        assert_eq!(lines[2], "Suggestion: Stay near the lifeboats.");
        assert_eq!(lines[3], "Fact: Women survived at far higher rates.");
    }

    #[test]
    fn lost_verdict() {
        let prediction = Prediction {
            prediction: 0,
            survival_probability: 0.12,
            explanation: Explanation {
                reason: "r".into(),
                suggestion: "s".into(),
                fact: "f".into(),
            },
        };
        let lines = render_prediction(&prediction);
        assert_eq!(lines[0], "Prediction: ❌ Did not survive (Probability: 12%)");
    }
}
