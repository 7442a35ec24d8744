//! Change impact engine: async analysis runs over the `risk_engine` scoring core.
//!
//! Fetches a commit-range diff, looks up per-file churn and ownership with
//! bounded concurrency, aggregates and ranks the results, and gates them
//! against a threshold. Pull requests are classified from their file list.
//!
//! No DB, no persistence; every run recomputes from scratch.

pub mod config;
pub mod engine;
pub mod error;
pub mod snapshot;
pub mod source;
pub mod types;

pub use config::{Config, RetrievalPolicy};
pub use engine::Engine;
pub use error::EngineError;
pub use snapshot::Snapshot;
pub use source::RepositorySource;
pub use types::{AnalysisOutput, AnalysisRequest, Invocation, PullRequestAnalysis, PushAnalysis};
