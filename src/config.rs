//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::interview::prompts;

/// Which prediction backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorBackend {
    /// POST the completed record to a remote prediction API.
    Http { url: String },
    /// Simulate the prediction in-process (no backend required).
    Local,
}

/// Chat configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Consecutive invalid answers tolerated per field before a full reset.
    pub max_attempts: u32,
    /// Upper bound of the accepted fare range, inclusive. `None` disables
    /// the cap (fares only need to be non-negative).
    pub fare_cap: Option<f64>,
    /// Prediction backend.
    pub predictor: PredictorBackend,
    /// Receptionist endpoint consulted on invalid answers. `None` disables
    /// the fallback path entirely.
    pub receptionist_url: Option<String>,
    /// Timeout applied to every outbound service request.
    pub request_timeout: Duration,
    /// Greeting that opens a fresh conversation.
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            fare_cap: Some(512.0),
            predictor: PredictorBackend::Local,
            receptionist_url: None,
            request_timeout: Duration::from_secs(10),
            greeting: prompts::DEFAULT_GREETING.to_string(),
        }
    }
}

/// Parse a fare-cap setting: a non-negative number, or `"none"` to disable
/// the cap.
pub fn parse_fare_cap(raw: &str) -> Result<Option<f64>, ConfigError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let cap: f64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: "fare_cap".to_string(),
        message: format!("expected a number or \"none\", got {raw:?}"),
    })?;
    if !cap.is_finite() || cap < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: "fare_cap".to_string(),
            message: format!("must be a finite non-negative number, got {cap}"),
        });
    }
    Ok(Some(cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.fare_cap, Some(512.0));
        assert_eq!(config.predictor, PredictorBackend::Local);
        assert!(config.receptionist_url.is_none());
    }

    #[test]
    fn parse_fare_cap_values() {
        assert_eq!(parse_fare_cap("512").unwrap(), Some(512.0));
        assert_eq!(parse_fare_cap(" 100.5 ").unwrap(), Some(100.5));
        assert_eq!(parse_fare_cap("none").unwrap(), None);
        assert_eq!(parse_fare_cap("NONE").unwrap(), None);
        assert!(parse_fare_cap("abc").is_err());
        assert!(parse_fare_cap("-1").is_err());
        assert!(parse_fare_cap("inf").is_err());
    }
}
