//! Per-file impact: size, churn, and ownership diffusion folded into one risk value.

use crate::config::ScoringConfig;
use crate::normalize::{clamp_unit, normalize};
use crate::types::{FileChangeFact, FileImpactResult};

/// Risk in [0, 1]: `size_weight*size + churn_weight*churn + ownership_weight*owner`.
///
/// Size and churn saturate at their caps so a large refactor cannot dominate
/// on volume alone.
pub fn score_file(
  additions: u32,
  deletions: u32,
  churn: u32,
  ownership_risk: f64,
  config: &ScoringConfig,
) -> f64 {
  let size = additions as f64 + deletions as f64;
  let size_component = normalize(size, 0.0, config.size_cap);
  let churn_component = normalize(churn as f64, 0.0, config.churn_cap);
  let owner_component = clamp_unit(ownership_risk);

  clamp_unit(
    config.size_weight * size_component
      + config.churn_weight * churn_component
      + config.ownership_weight * owner_component,
  )
}

/// Ownership diffusion from the number of recent commits touching a file.
///
/// Many recent touches is treated as diffuse ownership, i.e. riskier.
pub fn ownership_risk(recent_commits: u32, config: &ScoringConfig) -> f64 {
  normalize(recent_commits as f64, 0.0, config.churn_cap)
}

/// Score one diffed file from its churn and ownership samples.
pub fn assess_file(
  fact: &FileChangeFact,
  churn: u32,
  ownership_risk: f64,
  config: &ScoringConfig,
) -> FileImpactResult {
  let ownership_risk = clamp_unit(ownership_risk);
  FileImpactResult {
    path: fact.path.clone(),
    additions: fact.additions,
    deletions: fact.deletions,
    churn,
    ownership_risk,
    risk_score: score_file(fact.additions, fact.deletions, churn, ownership_risk, config),
  }
}
