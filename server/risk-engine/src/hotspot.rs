//! Reduce per-file risk to one repository-level score.

use crate::config::ScoringConfig;
use crate::types::{FileImpactResult, RepositoryImpact};

/// Mean of the top-k scores, `k = clamp(len / 2, 1, top_k_max)`.
///
/// A plain mean dilutes a few severe hotspots; a max overreacts to one outlier.
/// Empty input yields `0.0`.
pub fn aggregate(scores: &[f64], config: &ScoringConfig) -> f64 {
  if scores.is_empty() {
    return 0.0;
  }
  let k = (scores.len() / 2).clamp(1, config.top_k_max.max(1));

  let mut sorted = scores.to_vec();
  sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

  let top = &sorted[..k];
  top.iter().sum::<f64>() / top.len() as f64
}

/// Wrap scored files into a [`RepositoryImpact`], keeping their order.
pub fn summarize(per_file: Vec<FileImpactResult>, config: &ScoringConfig) -> RepositoryImpact {
  let scores: Vec<f64> = per_file.iter().map(|f| f.risk_score).collect();
  let aggregate_score = aggregate(&scores, config);
  tracing::debug!(files = per_file.len(), aggregate_score, "summarized repository impact");
  RepositoryImpact {
    aggregate_score,
    per_file,
  }
}
