//! In-memory repository snapshot implementing [`RepositorySource`].
//!
//! Lets the binary (and tests) run full analyses from a JSON document instead
//! of a live host: diffs keyed by ref pair, commit timestamps per path, and
//! pull-request file lists.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use risk_engine::{ChangedFile, FileChangeFact};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::source::RepositorySource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDiff {
  pub base: String,
  pub head: String,
  #[serde(default)]
  pub files: Vec<FileChangeFact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
  #[serde(default)]
  pub diffs: Vec<SnapshotDiff>,
  /// Commit timestamps per path.
  #[serde(default)]
  pub history: HashMap<String, Vec<DateTime<Utc>>>,
  #[serde(default)]
  pub pull_requests: HashMap<u64, Vec<ChangedFile>>,
}

impl Snapshot {
  pub fn with_diff(mut self, base: &str, head: &str, files: Vec<FileChangeFact>) -> Self {
    self.diffs.push(SnapshotDiff {
      base: base.to_string(),
      head: head.to_string(),
      files,
    });
    self
  }

  pub fn with_commits(mut self, path: &str, timestamps: Vec<DateTime<Utc>>) -> Self {
    self.history.entry(path.to_string()).or_default().extend(timestamps);
    self
  }

  pub fn with_pull_request(mut self, number: u64, files: Vec<ChangedFile>) -> Self {
    self.pull_requests.insert(number, files);
    self
  }

  fn count_since(&self, path: &str, since: DateTime<Utc>) -> u32 {
    self
      .history
      .get(path)
      .map(|ts| ts.iter().filter(|t| **t >= since).count() as u32)
      .unwrap_or(0)
  }
}

impl RepositorySource for Snapshot {
  async fn diff_files(&self, base: &str, head: &str) -> Result<Vec<FileChangeFact>, EngineError> {
    self
      .diffs
      .iter()
      .find(|d| d.base == base && d.head == head)
      .map(|d| d.files.clone())
      .ok_or_else(|| EngineError::retrieval(format!("diff {}...{}", base, head), "not in snapshot"))
  }

  async fn churn_count(&self, path: &str, since: DateTime<Utc>) -> Result<u32, EngineError> {
    Ok(self.count_since(path, since))
  }

  async fn pull_request_files(&self, number: u64) -> Result<Vec<ChangedFile>, EngineError> {
    self
      .pull_requests
      .get(&number)
      .cloned()
      .ok_or_else(|| EngineError::retrieval(format!("pull request #{}", number), "not in snapshot"))
  }
}
