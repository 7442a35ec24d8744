//! Pass/fail decision for an aggregate score.

use crate::types::Verdict;

/// `true` when the score stays strictly below the threshold.
///
/// The threshold is validated by the caller; no checks here.
pub fn decide(score: f64, threshold: f64) -> bool {
  score < threshold
}

/// [`decide`] plus a human-readable message.
pub fn verdict(score: f64, threshold: f64) -> Verdict {
  let ok = decide(score, threshold);
  let message = if ok {
    format!("Impact score {:.2} is below threshold {:.2}", score, threshold)
  } else {
    format!(
      "Impact score {:.2} meets or exceeds threshold {:.2}",
      score, threshold
    )
  };
  Verdict {
    ok,
    score,
    threshold,
    message,
  }
}
