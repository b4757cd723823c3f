use std::time::Duration;

use thiserror::Error;

/// Input validation failures. Any of these aborts a run before work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("no regions specified")]
    NoRegions,
    #[error("invalid region: {0}")]
    InvalidRegion(String),
    #[error("invalid service: {0}")]
    InvalidService(String),
}

/// A failed provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation}: {message}")]
pub struct ProviderError {
    pub operation: &'static str,
    pub message: String,
}

impl ProviderError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Why a collector, or one describe step inside it, stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("cancelled")]
    Cancelled,
    #[error("task panicked: {0}")]
    Panicked(String),
}
