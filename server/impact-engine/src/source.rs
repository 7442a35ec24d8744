//! Collaborator seam: where diffs, churn counts, and pull-request files come from.
//!
//! Implementations own transport, auth, and pagination; the engine only
//! sees these three calls. Every call is independent, so the engine may issue
//! many `churn_count` lookups concurrently.

use std::future::Future;

use chrono::{DateTime, Utc};
use risk_engine::{ChangedFile, FileChangeFact};

use crate::error::EngineError;

pub trait RepositorySource: Send + Sync + 'static {
  /// Files touched between two refs.
  fn diff_files(
    &self,
    base: &str,
    head: &str,
  ) -> impl Future<Output = Result<Vec<FileChangeFact>, EngineError>> + Send;

  /// Commits touching `path` at or after `since`.
  fn churn_count(
    &self,
    path: &str,
    since: DateTime<Utc>,
  ) -> impl Future<Output = Result<u32, EngineError>> + Send;

  /// Changed files of one pull request.
  fn pull_request_files(
    &self,
    number: u64,
  ) -> impl Future<Output = Result<Vec<ChangedFile>, EngineError>> + Send;
}
