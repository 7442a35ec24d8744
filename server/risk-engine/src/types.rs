//! Input/output types for the risk engine (JSON contract with callers).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Impact scoring (push / commit-range diffs)
// ---------------------------------------------------------------------------

/// One file touched in a commit-range diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeFact {
  pub path: String,
  #[serde(default)]
  pub additions: u32,
  #[serde(default)]
  pub deletions: u32,
}

impl FileChangeFact {
  pub fn new(path: impl Into<String>, additions: u32, deletions: u32) -> Self {
    Self {
      path: path.into(),
      additions,
      deletions,
    }
  }
}

/// Commits touching `path` within a trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnSample {
  pub path: String,
  pub recent_commits: u32,
}

/// The scored unit for one file. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileImpactResult {
  pub path: String,
  pub additions: u32,
  pub deletions: u32,
  pub churn: u32,
  /// Ownership diffusion in [0, 1].
  pub ownership_risk: f64,
  /// Weighted risk in [0, 1].
  pub risk_score: f64,
}

impl FileImpactResult {
  pub fn size(&self) -> u32 {
    self.additions.saturating_add(self.deletions)
  }
}

/// One analysis run: aggregate score plus the per-file results in diff order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryImpact {
  pub aggregate_score: f64,
  pub per_file: Vec<FileImpactResult>,
}

/// A ranked refactor candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedCandidate {
  pub path: String,
  /// Rounded to two decimals.
  pub priority: f64,
  pub effort: f64,
  pub rationale: String,
  pub recommended_action: String,
}

/// Pass/fail result of comparing an aggregate score with a threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
  pub ok: bool,
  pub score: f64,
  pub threshold: f64,
  pub message: String,
}

// ---------------------------------------------------------------------------
// Pull-request classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  Added,
  Modified,
  Removed,
  Renamed,
  /// Absent, or anything else the host reports (copied, changed, unchanged, ...).
  #[default]
  #[serde(other)]
  Other,
}

/// One changed file of a pull request. Absent fields default to empty / zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
  #[serde(default)]
  pub filename: String,
  #[serde(default)]
  pub status: FileStatus,
  #[serde(default)]
  pub additions: u32,
  #[serde(default)]
  pub deletions: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patch: Option<String>,
}

impl ChangedFile {
  pub fn new(filename: impl Into<String>, status: FileStatus, additions: u32, deletions: u32) -> Self {
    Self {
      filename: filename.into(),
      status,
      additions,
      deletions,
      patch: None,
    }
  }

  pub fn with_patch(mut self, patch: impl Into<String>) -> Self {
    self.patch = Some(patch.into());
    self
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
  Low,
  Medium,
  High,
}

impl Criticality {
  /// Annotation severity for this tier. Callers derive severity language from here.
  pub fn severity(self) -> Severity {
    match self {
      Self::Low => Severity::Info,
      Self::Medium => Severity::Warning,
      Self::High => Severity::Error,
    }
  }

  pub fn marker(self) -> &'static str {
    match self {
      Self::Low => "🟢",
      Self::Medium => "🟡",
      Self::High => "🔴",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
  pub changed: usize,
  pub added: usize,
  pub modified: usize,
  pub removed: usize,
  pub renamed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
  pub added: u64,
  pub deleted: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
  SensitiveFile,
  HardcodedSecret,
  SchemaWithoutMigration,
}

/// Structured form of one security warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFinding {
  pub kind: FindingKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
}

impl SecurityFinding {
  pub fn message(&self) -> String {
    let path = self.path.as_deref().unwrap_or_default();
    match self.kind {
      FindingKind::SensitiveFile => format!("⚠️ Sensitive file: {}", path),
      FindingKind::HardcodedSecret => format!("🔒 Potential hardcoded secret in: {}", path),
      FindingKind::SchemaWithoutMigration => {
        "⚠️ Database schema changes detected without migrations".to_string()
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestReport {
  /// 0..=100, two decimals.
  pub risk_score: f64,
  /// 0..=100, two decimals.
  pub complexity_score: f64,
  pub criticality: Criticality,
  pub files: FileCounts,
  pub lines: LineCounts,
  pub impact_areas: Vec<String>,
  pub file_extensions: Vec<String>,
  pub missing_tests: bool,
  pub missing_docs: bool,
  pub security_warnings: Vec<String>,
  pub security_findings: Vec<SecurityFinding>,
  pub suggestions: Vec<String>,
  pub recommended_reviewer_groups: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Annotations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
  pub message: String,
  pub severity: Severity,
}

// ---------------------------------------------------------------------------
// Subprocess contract (one JSON object in, one out)
// ---------------------------------------------------------------------------

/// Per-file input for impact scoring when churn is already known.
#[derive(Debug, Clone, Deserialize)]
pub struct ImpactSample {
  pub path: String,
  #[serde(default)]
  pub additions: u32,
  #[serde(default)]
  pub deletions: u32,
  #[serde(default)]
  pub churn: u32,
  /// Derived from `churn` when absent.
  #[serde(default)]
  pub ownership_risk: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
  PullRequest {
    #[serde(default)]
    files: Vec<ChangedFile>,
    #[serde(default)]
    config: crate::config::ClassifierConfig,
  },
  Impact {
    #[serde(default)]
    files: Vec<ImpactSample>,
    #[serde(default)]
    threshold: Option<f64>,
    #[serde(default)]
    config: crate::config::ScoringConfig,
  },
}

#[derive(Debug, Serialize)]
pub struct PullRequestOutput {
  pub summary: String,
  pub report: PullRequestReport,
  pub annotations: Vec<Annotation>,
}

#[derive(Debug, Serialize)]
pub struct ImpactOutput {
  pub impact: RepositoryImpact,
  pub candidates: Vec<PrioritizedCandidate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub verdict: Option<Verdict>,
}

/// Structured error output for a failed run or invalid input.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
  PullRequest(PullRequestOutput),
  Impact(ImpactOutput),
}
