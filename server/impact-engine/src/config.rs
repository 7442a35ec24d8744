//! Engine configuration with sane defaults, overridable from the environment.

use std::time::Duration;

use risk_engine::{ClassifierConfig, ScoringConfig};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// What to do when a per-file churn/ownership lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalPolicy {
  /// Abort the whole run.
  #[default]
  FailFast,
  /// Score the file as if churn and ownership diffusion were at their caps.
  AssumeMaxRisk,
  /// Drop the file from the result and log the omission.
  Exclude,
}

impl RetrievalPolicy {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
      "fail_fast" | "failfast" => Some(Self::FailFast),
      "assume_max_risk" | "max_risk" => Some(Self::AssumeMaxRisk),
      "exclude" | "skip" => Some(Self::Exclude),
      _ => None,
    }
  }
}

/// Tunables for one engine instance.
#[derive(Debug, Clone)]
pub struct Config {
  /// Trailing window for churn counts.
  pub churn_window_days: i64,
  /// Trailing window for the ownership-diffusion lookup.
  pub ownership_window_days: i64,
  /// Max concurrent per-file lookups.
  pub max_parallel: usize,
  /// Upper bound on one analysis run.
  pub request_timeout: Duration,
  pub retrieval_policy: RetrievalPolicy,
  /// Gate threshold when a request does not carry one.
  pub default_threshold: f64,
  pub scoring: ScoringConfig,
  pub classifier: ClassifierConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      churn_window_days: 60,
      ownership_window_days: 120,
      max_parallel: 8,
      request_timeout: Duration::from_secs(30),
      retrieval_policy: RetrievalPolicy::FailFast,
      default_threshold: 0.5,
      scoring: ScoringConfig::default(),
      classifier: ClassifierConfig::default(),
    }
  }
}

impl Config {
  /// Defaults overridden by `IMPACT_*` environment variables.
  pub fn from_env() -> Result<Self, EngineError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Defaults overridden by whatever `lookup` returns for each `IMPACT_*` key.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::default();

    if let Some(v) = lookup("IMPACT_CHURN_WINDOW_DAYS") {
      config.churn_window_days = parse_days("IMPACT_CHURN_WINDOW_DAYS", &v)?;
    }
    if let Some(v) = lookup("IMPACT_OWNERSHIP_WINDOW_DAYS") {
      config.ownership_window_days = parse_days("IMPACT_OWNERSHIP_WINDOW_DAYS", &v)?;
    }
    if let Some(v) = lookup("IMPACT_MAX_PARALLEL") {
      config.max_parallel = v
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| EngineError::validation("IMPACT_MAX_PARALLEL", "expected a positive integer"))?;
    }
    if let Some(v) = lookup("IMPACT_TIMEOUT_SECS") {
      let secs = v
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| EngineError::validation("IMPACT_TIMEOUT_SECS", "expected a positive integer"))?;
      config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(v) = lookup("IMPACT_RETRIEVAL_POLICY") {
      config.retrieval_policy = RetrievalPolicy::from_str_loose(&v).ok_or_else(|| {
        EngineError::validation(
          "IMPACT_RETRIEVAL_POLICY",
          "expected fail_fast|assume_max_risk|exclude",
        )
      })?;
    }
    if let Some(v) = lookup("IMPACT_THRESHOLD") {
      config.default_threshold = parse_threshold("IMPACT_THRESHOLD", &v)?;
    }

    Ok(config)
  }
}

fn parse_days(field: &str, raw: &str) -> Result<i64, EngineError> {
  raw
    .trim()
    .parse::<i64>()
    .ok()
    .filter(|d| *d > 0)
    .ok_or_else(|| EngineError::validation(field, "expected a positive number of days"))
}

/// A gate threshold must lie in [0, 1].
pub fn parse_threshold(field: &str, raw: &str) -> Result<f64, EngineError> {
  let value = raw
    .trim()
    .parse::<f64>()
    .map_err(|e| EngineError::validation(field, &format!("invalid number: {}", e)))?;
  validate_threshold(field, value)
}

pub fn validate_threshold(field: &str, value: f64) -> Result<f64, EngineError> {
  if (0.0..=1.0).contains(&value) {
    Ok(value)
  } else {
    Err(EngineError::validation(field, "must be within [0, 1]"))
  }
}
