//! Structured error types for the impact engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  /// A collaborator call (diff fetch, churn lookup) failed.
  #[error("retrieval: {what}: {reason}")]
  Retrieval { what: String, reason: String },

  #[error("timeout: analysis exceeded {seconds}s")]
  Timeout { seconds: u64 },

  #[error("task: {0}")]
  Task(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn retrieval(what: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Retrieval {
      what: what.into(),
      reason: reason.into(),
    }
  }
}
