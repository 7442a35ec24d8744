//! Change risk & prioritization engine: rule-based scoring; no AI, no DB, no network.
//!
//! Converts raw change facts (lines touched, churn, ownership diffusion, path
//! semantics) into normalized risk scores, a repository-level impact score, a
//! ranked refactor-candidate list, and pull-request risk reports.
//! Used by the binary for stdin/stdout; can also be called as a library.

pub mod annotate;
pub mod classify;
pub mod config;
pub mod gate;
pub mod hotspot;
pub mod normalize;
pub mod prioritize;
pub mod score;
pub mod secrets;
pub mod types;

pub use classify::{classify_pull_request, classify_with_scanner};
pub use config::{ClassifierConfig, ScoringConfig};
pub use gate::{decide, verdict};
pub use hotspot::aggregate;
pub use normalize::normalize;
pub use prioritize::prioritize;
pub use score::score_file;
pub use secrets::{KeywordAssignmentScanner, SecretScanner};
pub use types::*;

/// Score already-collected per-file facts into a [`RepositoryImpact`].
///
/// `samples` pairs each diffed file with its churn count and ownership risk.
pub fn score_impact(samples: &[(FileChangeFact, u32, f64)], config: &ScoringConfig) -> RepositoryImpact {
  let per_file = samples
    .iter()
    .map(|(fact, churn, owner)| score::assess_file(fact, *churn, *owner, config))
    .collect();
  hotspot::summarize(per_file, config)
}

/// Run the engine on a parsed request and return the output (no I/O).
pub fn run(request: &Request) -> Output {
  match request {
    Request::PullRequest { files, config } => {
      let report = classify_pull_request(files, config);
      Output::PullRequest(PullRequestOutput {
        summary: annotate::summary(&report),
        annotations: annotate::annotations(&report),
        report,
      })
    }
    Request::Impact {
      files,
      threshold,
      config,
    } => {
      let samples: Vec<(FileChangeFact, u32, f64)> = files
        .iter()
        .map(|f| {
          let owner = f
            .ownership_risk
            .unwrap_or_else(|| score::ownership_risk(f.churn, config));
          (FileChangeFact::new(f.path.clone(), f.additions, f.deletions), f.churn, owner)
        })
        .collect();
      let impact = score_impact(&samples, config);
      let candidates = prioritize(&impact.per_file, config);
      let verdict = threshold.map(|t| gate::verdict(impact.aggregate_score, t));
      Output::Impact(ImpactOutput {
        impact,
        candidates,
        verdict,
      })
    }
  }
}

/// Parse a JSON request, run it, and serialize the output. Failures come back
/// as the `ErrorOutput` a caller prints instead.
pub fn run_json(raw: &str) -> Result<Vec<u8>, ErrorOutput> {
  let request: Request =
    serde_json::from_str(raw).map_err(|e| ErrorOutput::new(format!("invalid request: {}", e)))?;
  serde_json::to_vec(&run(&request)).map_err(|e| ErrorOutput::new(e.to_string()))
}
