//! In-process simulated predictor — no backend required.
//!
//! A deterministic heuristic over the same factors the real model weighs
//! (sex, class, age, fare), scaled around the historical ~38% survival
//! rate. Good enough for demos and offline use.

use async_trait::async_trait;

use crate::error::PredictorError;
use crate::interview::AnswerRecord;

use super::{Explanation, Prediction, Predictor};

/// Simulated survival predictor.
#[derive(Debug, Default)]
pub struct LocalPredictor;

impl LocalPredictor {
    pub fn new() -> Self {
        Self
    }
}

fn get_str<'a>(record: &'a AnswerRecord, key: &str) -> Result<&'a str, PredictorError> {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PredictorError::InvalidRecord {
            reason: format!("missing string field {key:?}"),
        })
}

fn get_f64(record: &AnswerRecord, key: &str) -> Result<f64, PredictorError> {
    record
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| PredictorError::InvalidRecord {
            reason: format!("missing numeric field {key:?}"),
        })
}

#[async_trait]
impl Predictor for LocalPredictor {
    async fn predict(&self, record: &AnswerRecord) -> Result<Prediction, PredictorError> {
        let sex = get_str(record, "sex")?;
        let class = get_f64(record, "class")? as i64;
        let age = get_f64(record, "age")?;
        let fare = get_f64(record, "fare")?;

        // Historical base rate, nudged by the dominant factors.
        let mut p: f64 = 0.38;
        let female = sex == "female";
        if female {
            p += 0.35;
        } else {
            p -= 0.15;
        }
        p += match class {
            1 => 0.15,
            2 => 0.03,
            _ => -0.08,
        };
        if age < 16.0 {
            p += 0.10;
        } else if age > 60.0 {
            p -= 0.08;
        }
        if fare > 100.0 {
            p += 0.05;
        }
        let p = p.clamp(0.02, 0.98);
        let survived = p >= 0.5;

        let class_word = match class {
            1 => "first",
            2 => "second",
            _ => "third",
        };
        let reason = format!(
            "Traveling {class_word} class as a {}-year-old {} put you on the {} side of the evacuation odds.",
            age.round(),
            if female { "woman" } else { "man" },
            if survived { "favorable" } else { "unfavorable" },
        );
        let suggestion = if survived {
            "Stay close to the boat deck and board a lifeboat early.".to_string()
        } else {
            "A first-class cabin near the boat deck would have improved your odds considerably."
                .to_string()
        };
        let fact = if female {
            "About 74% of women aboard survived, against roughly 19% of men.".to_string()
        } else {
            "Only about 19% of men survived; 'women and children first' was enforced at most boats."
                .to_string()
        };

        Prediction {
            prediction: survived as u8,
            survival_probability: (p * 100.0).round() / 100.0,
            explanation: Explanation {
                reason,
                suggestion,
                fact,
            },
        }
        .validate()
    }
}
