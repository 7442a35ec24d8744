//! Binary entrypoint: read one JSON request from stdin, write one JSON object to stdout.
//!
//! `{"kind": "pull_request", "files": [...]}` classifies a pull request;
//! `{"kind": "impact", "files": [...], "threshold": 0.5}` scores a diff.
//! Failures print an ErrorOutput and exit 1. Logs go to stderr (`RUST_LOG`).

use risk_engine::{run_json, ErrorOutput};
use std::io::{self, Read, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(io::stderr))
    .with(EnvFilter::from_default_env())
    .init();

  let mut raw = String::new();
  let result = match io::stdin().lock().read_to_string(&mut raw) {
    Ok(_) => run_json(&raw),
    Err(e) => Err(ErrorOutput::new(e.to_string()).with_field("stdin")),
  };

  let stdout = io::stdout();
  let mut out = stdout.lock();

  match result {
    Ok(json) => {
      let _ = out.write_all(&json);
      let _ = writeln!(out);
      let _ = out.flush();
    }
    Err(err) => {
      tracing::error!(error = %err.message, "risk-engine failed");
      let _ = serde_json::to_writer(&mut out, &err);
      let _ = writeln!(out);
      let _ = out.flush();
      std::process::exit(1);
    }
  }
}
