//! Titanic Chat — conversational survival-prediction interview core.

pub mod config;
pub mod error;
pub mod interview;
pub mod services;
pub mod session;
