//! Binary entrypoint: read one JSON invocation from stdin, write one JSON object to stdout.
//!
//! The invocation carries a repository snapshot and a push or pull-request
//! request. Output is either the analysis or an ErrorOutput (exit code 1).
//! Configuration comes from `IMPACT_*` variables; logs go to stderr.

use impact_engine::types::ErrorOutput;
use impact_engine::{Config, Engine, EngineError, Invocation};
use std::io::{self, Read, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(io::stderr))
    .with(EnvFilter::from_default_env())
    .init();

  let result = run_binary().await;

  let stdout = io::stdout();
  let mut out = stdout.lock();

  match result {
    Ok(json) => {
      let _ = out.write_all(&json);
      let _ = writeln!(out);
    }
    Err(e) => {
      tracing::error!(error = %e, "impact-engine run failed");
      let err = match &e {
        EngineError::Validation { field, reason } => {
          ErrorOutput::new(reason.clone()).with_field(field.clone())
        }
        _ => ErrorOutput::new(e.to_string()),
      };
      let _ = serde_json::to_writer(&mut out, &err);
      let _ = writeln!(out);
      let _ = out.flush();
      std::process::exit(1);
    }
  }

  let _ = out.flush();
}

async fn run_binary() -> Result<Vec<u8>, EngineError> {
  let config = Config::from_env()?;

  let mut raw = String::new();
  io::stdin()
    .lock()
    .read_to_string(&mut raw)
    .map_err(|e| EngineError::validation("stdin", &e.to_string()))?;
  let invocation: Invocation = serde_json::from_str(&raw)?;

  let engine = Engine::new(config, invocation.snapshot);
  let output = engine.run(&invocation.request).await?;
  Ok(serde_json::to_vec(&output)?)
}
