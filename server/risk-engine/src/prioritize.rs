//! Rank impact results into refactor candidates: high risk, low effort first.

use crate::config::ScoringConfig;
use crate::normalize::{clamp_unit, normalize, round2};
use crate::types::{FileImpactResult, PrioritizedCandidate};

/// Refactor effort in [0, 1] from lines changed.
pub fn effort(result: &FileImpactResult, config: &ScoringConfig) -> f64 {
  normalize(result.size() as f64, 0.0, config.effort_cap)
}

/// Unrounded priority for one file.
pub fn priority(result: &FileImpactResult, config: &ScoringConfig) -> f64 {
  let effort = effort(result, config);
  clamp_unit(
    config.priority_risk_weight * result.risk_score
      + config.priority_ease_weight * (1.0 - effort)
      + config.priority_ownership_weight * result.ownership_risk,
  )
}

/// Top `max_candidates` files by priority, descending.
///
/// Equal priorities keep their input order (`sort_by` is stable).
pub fn prioritize(per_file: &[FileImpactResult], config: &ScoringConfig) -> Vec<PrioritizedCandidate> {
  let mut ranked: Vec<(f64, f64, &FileImpactResult)> = per_file
    .iter()
    .map(|r| (priority(r, config), effort(r, config), r))
    .collect();

  ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
  ranked.truncate(config.max_candidates);

  tracing::debug!(
    files = per_file.len(),
    candidates = ranked.len(),
    "ranked refactor candidates"
  );

  ranked
    .into_iter()
    .map(|(priority, effort, r)| PrioritizedCandidate {
      path: r.path.clone(),
      priority: round2(priority),
      effort,
      rationale: format!(
        "Risk {:.2}, effort {:.2}, {} recent commits",
        r.risk_score, effort, r.churn
      ),
      recommended_action: config.recommended_action.clone(),
    })
    .collect()
}
