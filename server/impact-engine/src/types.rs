//! Request/response types for analysis runs (JSON contract with callers).

pub use risk_engine::ErrorOutput;
use risk_engine::{Annotation, PrioritizedCandidate, PullRequestReport, RepositoryImpact};
use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

// ---------------------------------------------------------------------------
// Inbound types
// ---------------------------------------------------------------------------

/// Analyze a push: the commit range `base...head`.
#[derive(Debug, Clone, Deserialize)]
pub struct PushRequest {
  pub repo: String,
  pub base: String,
  pub head: String,
  /// Gate threshold in [0, 1]; engine default when absent.
  #[serde(default)]
  pub threshold: Option<f64>,
  #[serde(default)]
  pub churn_window_days: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRequest {
  pub repo: String,
  pub pr_number: u64,
  #[serde(default)]
  pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisRequest {
  Push(PushRequest),
  PullRequest(PullRequestRequest),
}

/// One stdin document: the repository data plus what to analyze.
#[derive(Debug, Deserialize)]
pub struct Invocation {
  #[serde(default)]
  pub snapshot: Snapshot,
  pub request: AnalysisRequest,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PushAnalysis {
  pub run_id: String,
  pub repo: String,
  pub ok: bool,
  pub score: f64,
  pub threshold: f64,
  pub message: String,
  pub impact: RepositoryImpact,
  pub candidates: Vec<PrioritizedCandidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PullRequestAnalysis {
  pub run_id: String,
  pub repo: String,
  pub pr_number: u64,
  pub ok: bool,
  /// Risk score scaled to [0, 1].
  pub score: f64,
  pub threshold: f64,
  pub summary: String,
  pub report: PullRequestReport,
  pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
  Push(PushAnalysis),
  PullRequest(PullRequestAnalysis),
}
