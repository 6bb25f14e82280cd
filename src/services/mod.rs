//! External collaborators — the receptionist and the survival predictor.
//!
//! Both are reached only through the traits here. The predictor supports
//! two backends (remote HTTP API or an in-process simulation); the
//! receptionist is optional — when absent, invalid answers simply get the
//! restated prompt with no clarification message.

pub mod http;
pub mod local;

pub use http::{HttpPredictor, HttpReceptionist};
pub use local::LocalPredictor;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{ChatConfig, PredictorBackend};
use crate::error::{PredictorError, ReceptionistError};
use crate::interview::AnswerRecord;

/// Explanation block accompanying a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub reason: String,
    pub suggestion: String,
    pub fact: String,
}

/// Structured verdict returned by the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 1 = survived, 0 = did not survive.
    pub prediction: u8,
    /// Probability of survival in `[0, 1]`.
    pub survival_probability: f64,
    pub explanation: Explanation,
}

impl Prediction {
    pub fn survived(&self) -> bool {
        self.prediction == 1
    }

    /// Schema check applied to every predictor response.
    pub fn validate(self) -> Result<Self, PredictorError> {
        if self.prediction > 1 {
            return Err(PredictorError::InvalidResponse {
                reason: format!("prediction must be 0 or 1, got {}", self.prediction),
            });
        }
        if !(0.0..=1.0).contains(&self.survival_probability) {
            return Err(PredictorError::InvalidResponse {
                reason: format!(
                    "survival_probability out of range: {}",
                    self.survival_probability
                ),
            });
        }
        Ok(self)
    }
}

/// Fallback responder consulted when an answer fails validation.
///
/// Best-effort: callers degrade a failure to a canned substitute and never
/// let it block the interview.
#[async_trait]
pub trait Receptionist: Send + Sync {
    /// Produce a conversational clarification for the rejected input.
    async fn clarify(&self, question: &str) -> Result<String, ReceptionistError>;
}

/// Survival predictor, invoked exactly once per completed interview.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, record: &AnswerRecord) -> Result<Prediction, PredictorError>;
}

/// Create the predictor selected by configuration.
pub fn create_predictor(config: &ChatConfig) -> Arc<dyn Predictor> {
    match &config.predictor {
        PredictorBackend::Http { url } => {
            tracing::info!("Using HTTP predictor at {url}");
            Arc::new(HttpPredictor::new(url.clone(), config.request_timeout))
        }
        PredictorBackend::Local => {
            tracing::info!("Using local simulated predictor");
            Arc::new(LocalPredictor::new())
        }
    }
}

/// Create the receptionist client, if one is configured.
pub fn create_receptionist(config: &ChatConfig) -> Option<Arc<dyn Receptionist>> {
    config.receptionist_url.as_ref().map(|url| {
        tracing::info!("Using receptionist at {url}");
        Arc::new(HttpReceptionist::new(url.clone(), config.request_timeout))
            as Arc<dyn Receptionist>
    })
}
