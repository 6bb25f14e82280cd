//! HTTP clients for the remote receptionist and predictor APIs.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{PredictorError, ReceptionistError};
use crate::interview::AnswerRecord;

use super::{Prediction, Predictor, Receptionist};

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Receptionist backed by a `{question} -> {answer}` endpoint.
pub struct HttpReceptionist {
    url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AnswerPayload {
    answer: String,
}

impl HttpReceptionist {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self {
            url,
            client: build_client(timeout),
        }
    }
}

#[async_trait]
impl Receptionist for HttpReceptionist {
    async fn clarify(&self, question: &str) -> Result<String, ReceptionistError> {
        let body = serde_json::json!({ "question": question });
        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ReceptionistError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ReceptionistError::RequestFailed {
                reason: format!("status {}", resp.status()),
            });
        }

        let payload: AnswerPayload =
            resp.json()
                .await
                .map_err(|e| ReceptionistError::InvalidResponse {
                    reason: e.to_string(),
                })?;
        Ok(payload.answer)
    }
}

/// Predictor backed by the survival-prediction API. The completed record
/// is posted as-is; the response must match the [`Prediction`] schema.
pub struct HttpPredictor {
    url: String,
    client: reqwest::Client,
}

impl HttpPredictor {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self {
            url,
            client: build_client(timeout),
        }
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, record: &AnswerRecord) -> Result<Prediction, PredictorError> {
        let resp = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| PredictorError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(PredictorError::RequestFailed {
                reason: format!("status {}", resp.status()),
            });
        }

        let prediction: Prediction =
            resp.json()
                .await
                .map_err(|e| PredictorError::InvalidResponse {
                    reason: e.to_string(),
                })?;
        prediction.validate()
    }
}
