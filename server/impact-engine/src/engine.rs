//! Core engine: drives collaborators, fans out per-file lookups, scores results.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use risk_engine::{
  annotate, classify, gate, hotspot, prioritize, score, ChangedFile, ChurnSample, FileChangeFact,
  FileImpactResult, PrioritizedCandidate, PullRequestReport, RepositoryImpact,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::{validate_threshold, Config, RetrievalPolicy};
use crate::error::EngineError;
use crate::source::RepositorySource;
use crate::types::*;

/// The change impact engine. Holds no state between runs.
pub struct Engine<S> {
  config: Config,
  source: Arc<S>,
}

impl<S: RepositorySource> Engine<S> {
  pub fn new(config: Config, source: S) -> Self {
    Self {
      config,
      source: Arc::new(source),
    }
  }

  pub fn with_defaults(source: S) -> Self {
    Self::new(Config::default(), source)
  }

  /// Score the commit range `base...head`, counting churn over `churn_window_days`.
  ///
  /// Either every file is scored or the run fails; no partial result.
  pub async fn compute_impact(
    &self,
    base: &str,
    head: &str,
    churn_window_days: i64,
  ) -> Result<RepositoryImpact, EngineError> {
    self
      .compute_impact_at(base, head, churn_window_days, Utc::now())
      .await
  }

  /// [`Engine::compute_impact`] with an explicit clock.
  pub async fn compute_impact_at(
    &self,
    base: &str,
    head: &str,
    churn_window_days: i64,
    now: DateTime<Utc>,
  ) -> Result<RepositoryImpact, EngineError> {
    if churn_window_days <= 0 {
      return Err(EngineError::validation(
        "churn_window_days",
        "must be a positive number of days",
      ));
    }
    self
      .within_deadline(self.score_range(base, head, churn_window_days, now))
      .await
  }

  pub fn rank_candidates(&self, impact: &RepositoryImpact) -> Vec<PrioritizedCandidate> {
    prioritize::prioritize(&impact.per_file, &self.config.scoring)
  }

  pub fn gate(&self, aggregate_score: f64, threshold: f64) -> bool {
    gate::decide(aggregate_score, threshold)
  }

  pub fn classify_pull_request(&self, files: &[ChangedFile]) -> PullRequestReport {
    classify::classify_pull_request(files, &self.config.classifier)
  }

  /// Impact, ranking, and gate verdict for one push.
  pub async fn analyze_push(&self, req: &PushRequest) -> Result<PushAnalysis, EngineError> {
    self.analyze_push_at(req, Utc::now()).await
  }

  pub async fn analyze_push_at(
    &self,
    req: &PushRequest,
    now: DateTime<Utc>,
  ) -> Result<PushAnalysis, EngineError> {
    if req.repo.is_empty() {
      return Err(EngineError::validation("repo", "must not be empty"));
    }
    if req.base.is_empty() {
      return Err(EngineError::validation("base", "must not be empty"));
    }
    if req.head.is_empty() {
      return Err(EngineError::validation("head", "must not be empty"));
    }
    let threshold = self.threshold(req.threshold)?;
    let window = req.churn_window_days.unwrap_or(self.config.churn_window_days);

    let impact = self.compute_impact_at(&req.base, &req.head, window, now).await?;
    let candidates = self.rank_candidates(&impact);
    let verdict = gate::verdict(impact.aggregate_score, threshold);

    tracing::info!(
      repo = %req.repo,
      base = %req.base,
      head = %req.head,
      files = impact.per_file.len(),
      score = impact.aggregate_score,
      ok = verdict.ok,
      "push analyzed"
    );

    Ok(PushAnalysis {
      run_id: run_id(&["push", &req.repo, &req.base, &req.head]),
      repo: req.repo.clone(),
      ok: verdict.ok,
      score: verdict.score,
      threshold,
      message: verdict.message,
      impact,
      candidates,
    })
  }

  /// Classification, annotations, and gate verdict for one pull request.
  pub async fn analyze_pull_request(
    &self,
    req: &PullRequestRequest,
  ) -> Result<PullRequestAnalysis, EngineError> {
    if req.repo.is_empty() {
      return Err(EngineError::validation("repo", "must not be empty"));
    }
    if req.pr_number == 0 {
      return Err(EngineError::validation("pr_number", "must be >= 1"));
    }
    let threshold = self.threshold(req.threshold)?;

    let files = self
      .within_deadline(self.source.pull_request_files(req.pr_number))
      .await?;
    let report = self.classify_pull_request(&files);
    let score = (report.risk_score / 100.0).clamp(0.0, 1.0);
    let ok = self.gate(score, threshold);

    tracing::info!(
      repo = %req.repo,
      pr = req.pr_number,
      files = report.files.changed,
      risk = report.risk_score,
      criticality = report.criticality.as_str(),
      ok,
      "pull request analyzed"
    );

    Ok(PullRequestAnalysis {
      run_id: run_id(&["pull_request", &req.repo, &req.pr_number.to_string()]),
      repo: req.repo.clone(),
      pr_number: req.pr_number,
      ok,
      score,
      threshold,
      summary: annotate::summary(&report),
      annotations: annotate::annotations(&report),
      report,
    })
  }

  pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisOutput, EngineError> {
    match request {
      AnalysisRequest::Push(req) => self.analyze_push(req).await.map(AnalysisOutput::Push),
      AnalysisRequest::PullRequest(req) => self
        .analyze_pull_request(req)
        .await
        .map(AnalysisOutput::PullRequest),
    }
  }

  fn threshold(&self, requested: Option<f64>) -> Result<f64, EngineError> {
    validate_threshold("threshold", requested.unwrap_or(self.config.default_threshold))
  }

  async fn within_deadline<T, F>(&self, fut: F) -> Result<T, EngineError>
  where
    F: std::future::Future<Output = Result<T, EngineError>>,
  {
    match tokio::time::timeout(self.config.request_timeout, fut).await {
      Ok(result) => result,
      Err(_) => {
        let seconds = self.config.request_timeout.as_secs();
        tracing::warn!(seconds, "analysis timed out; discarding in-flight lookups");
        Err(EngineError::Timeout { seconds })
      }
    }
  }

  async fn score_range(
    &self,
    base: &str,
    head: &str,
    churn_window_days: i64,
    now: DateTime<Utc>,
  ) -> Result<RepositoryImpact, EngineError> {
    let facts = self.source.diff_files(base, head).await?;
    let churn_since = now - Duration::days(churn_window_days);
    let ownership_since = now - Duration::days(self.config.ownership_window_days);

    tracing::debug!(
      base,
      head,
      files = facts.len(),
      max_parallel = self.config.max_parallel,
      "fetching churn and ownership"
    );

    let semaphore = Arc::new(Semaphore::new(self.config.max_parallel.max(1)));
    let mut lookups = JoinSet::new();

    for (index, fact) in facts.iter().enumerate() {
      let source = Arc::clone(&self.source);
      let semaphore = Arc::clone(&semaphore);
      let path = fact.path.clone();

      lookups.spawn(async move {
        let lookup = async {
          let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|e| EngineError::Task(e.to_string()))?;
          let recent_commits = source.churn_count(&path, churn_since).await?;
          let ownership_commits = source.churn_count(&path, ownership_since).await?;
          let churn = ChurnSample { path, recent_commits };
          Ok::<_, EngineError>((churn, ownership_commits))
        }
        .await;
        (index, lookup)
      });
    }

    // Dropping `lookups` on an early return aborts whatever is still running.
    let mut slots: Vec<Option<FileImpactResult>> = vec![None; facts.len()];
    while let Some(joined) = lookups.join_next().await {
      let (index, lookup) = joined.map_err(|e| EngineError::Task(e.to_string()))?;
      let fact = &facts[index];
      match lookup {
        Ok((churn, ownership_commits)) => {
          tracing::trace!(
            path = %churn.path,
            recent_commits = churn.recent_commits,
            ownership_commits,
            "file history"
          );
          let owner = score::ownership_risk(ownership_commits, &self.config.scoring);
          slots[index] = Some(score::assess_file(
            fact,
            churn.recent_commits,
            owner,
            &self.config.scoring,
          ));
        }
        Err(err) => slots[index] = self.absorb_failure(fact, err)?,
      }
    }

    let per_file: Vec<FileImpactResult> = slots.into_iter().flatten().collect();
    Ok(hotspot::summarize(per_file, &self.config.scoring))
  }

  /// Apply the retrieval policy to one failed lookup.
  fn absorb_failure(
    &self,
    fact: &FileChangeFact,
    err: EngineError,
  ) -> Result<Option<FileImpactResult>, EngineError> {
    match self.config.retrieval_policy {
      RetrievalPolicy::FailFast => Err(err),
      RetrievalPolicy::AssumeMaxRisk => {
        tracing::warn!(path = %fact.path, error = %err, "lookup failed; assuming maximal churn");
        let churn = self.config.scoring.churn_cap.max(0.0).round() as u32;
        Ok(Some(score::assess_file(fact, churn, 1.0, &self.config.scoring)))
      }
      RetrievalPolicy::Exclude => {
        tracing::warn!(path = %fact.path, error = %err, "lookup failed; file excluded");
        Ok(None)
      }
    }
  }
}

/// Stable run id: `run-` + 16 hex chars of a blake3 hash over the request identity.
pub fn run_id(parts: &[&str]) -> String {
  let mut hasher = blake3::Hasher::new();
  for (i, part) in parts.iter().enumerate() {
    if i > 0 {
      hasher.update(b"|");
    }
    hasher.update(part.as_bytes());
  }
  let hex = hasher.finalize().to_hex();
  format!("run-{}", &hex[..16])
}
