//! Scoring weights, caps, and lookup tables with sane defaults.

use serde::{Deserialize, Serialize};

/// Tunables for file impact, hotspot aggregation, and candidate ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
  /// Lines changed at which the size component saturates.
  pub size_cap: f64,
  /// Recent commits at which the churn component saturates.
  pub churn_cap: f64,
  pub size_weight: f64,
  pub churn_weight: f64,
  pub ownership_weight: f64,
  /// Upper bound on k for the top-k hotspot mean.
  pub top_k_max: usize,
  /// Lines changed at which refactor effort saturates.
  pub effort_cap: f64,
  pub priority_risk_weight: f64,
  /// Weight of `1 - effort`.
  pub priority_ease_weight: f64,
  pub priority_ownership_weight: f64,
  pub max_candidates: usize,
  pub recommended_action: String,
}

impl Default for ScoringConfig {
  fn default() -> Self {
    Self {
      size_cap: 400.0,
      churn_cap: 20.0,
      size_weight: 0.5,
      churn_weight: 0.3,
      ownership_weight: 0.2,
      top_k_max: 5,
      effort_cap: 800.0,
      priority_risk_weight: 0.6,
      priority_ease_weight: 0.3,
      priority_ownership_weight: 0.1,
      max_candidates: 10,
      recommended_action: "Add tests and refactor complex sections".to_string(),
    }
  }
}

/// A path keyword and the points it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordWeight {
  pub keyword: String,
  pub weight: u32,
}

/// A path keyword and the reviewer team it routes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerRoute {
  pub keyword: String,
  pub team: String,
}

/// Tables and thresholds for the pull-request classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
  /// Scanned in order; first match per file wins.
  pub critical_patterns: Vec<KeywordWeight>,
  pub sensitive_patterns: Vec<String>,
  pub secret_keywords: Vec<String>,
  pub code_extensions: Vec<String>,
  /// Substrings marking a documentation change (in addition to `.md`).
  pub doc_markers: Vec<String>,
  pub reviewer_routes: Vec<ReviewerRoute>,
  pub schema_markers: Vec<String>,
  pub migration_marker: String,
  pub test_marker: String,

  pub many_files: usize,
  pub very_many_files: usize,
  pub many_files_points: f64,
  pub very_many_files_points: f64,
  pub large_additions: u64,
  pub very_large_additions: u64,
  pub large_additions_points: f64,
  pub very_large_additions_points: f64,
  /// Fraction of the complexity score folded into risk.
  pub complexity_blend: f64,

  pub medium_tier_at: f64,
  pub high_tier_at: f64,

  pub docs_min_files: usize,
  pub split_suggestion_above: f64,
  pub reviewers_suggestion_above: f64,
  pub large_additions_suggestion_above: u64,
  pub file_count_suggestion_above: usize,
  pub added_files_suggestion_above: usize,
}

fn weights(pairs: &[(&str, u32)]) -> Vec<KeywordWeight> {
  pairs
    .iter()
    .map(|(k, w)| KeywordWeight {
      keyword: k.to_string(),
      weight: *w,
    })
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

impl Default for ClassifierConfig {
  fn default() -> Self {
    Self {
      critical_patterns: weights(&[
        ("auth", 20),
        ("security", 20),
        ("config", 15),
        ("database", 15),
        ("migration", 15),
        (".env", 25),
        ("dockerfile", 10),
        ("package.json", 10),
        ("requirements.txt", 10),
      ]),
      sensitive_patterns: strings(&[
        "secret",
        "password",
        "private_key",
        "api_key",
        ".env",
        "credentials",
        "token",
      ]),
      secret_keywords: strings(&["password", "api_key", "secret", "token", "private_key"]),
      code_extensions: strings(&[".js", ".py", ".ts", ".jsx", ".tsx", ".java", ".go"]),
      doc_markers: strings(&["readme", "doc"]),
      reviewer_routes: [
        ("backend", "backend-team"),
        ("frontend", "frontend-team"),
        ("api", "api-team"),
        ("database", "database-team"),
        ("security", "security-team"),
        ("infrastructure", "devops-team"),
      ]
      .iter()
      .map(|(k, t)| ReviewerRoute {
        keyword: k.to_string(),
        team: t.to_string(),
      })
      .collect(),
      schema_markers: strings(&["model", "schema"]),
      migration_marker: "migration".to_string(),
      test_marker: "test".to_string(),

      many_files: 10,
      very_many_files: 20,
      many_files_points: 20.0,
      very_many_files_points: 30.0,
      large_additions: 500,
      very_large_additions: 1000,
      large_additions_points: 30.0,
      very_large_additions_points: 40.0,
      complexity_blend: 0.3,

      medium_tier_at: 30.0,
      high_tier_at: 70.0,

      docs_min_files: 5,
      split_suggestion_above: 70.0,
      reviewers_suggestion_above: 50.0,
      large_additions_suggestion_above: 500,
      file_count_suggestion_above: 15,
      added_files_suggestion_above: 10,
    }
  }
}
