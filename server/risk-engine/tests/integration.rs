//! Integration tests for the risk engine's JSON contract.

use risk_engine::{run, Criticality, Output, Request};

fn run_json(json: &str) -> Output {
  let request: Request = serde_json::from_str(json).unwrap();
  run(&request)
}

#[test]
fn empty_pull_request_is_low_risk() {
  let out = match run_json(r#"{"kind": "pull_request", "files": []}"#) {
    Output::PullRequest(out) => out,
    Output::Impact(_) => panic!("expected pull-request output"),
  };
  assert_eq!(out.report.risk_score, 0.0);
  assert_eq!(out.report.complexity_score, 0.0);
  assert_eq!(out.report.criticality, Criticality::Low);
  assert!(out.report.suggestions.is_empty());
  assert!(out.report.security_warnings.is_empty());

  let json = serde_json::to_value(&out).unwrap();
  assert_eq!(json["report"]["criticality"], "low");
  assert_eq!(json["annotations"][0]["severity"], "info");
}

#[test]
fn classifier_tables_can_be_extended_from_json() {
  let out = match run_json(
    r#"{"kind": "pull_request",
        "files": [{"filename": "billing/stripe.rb", "status": "modified", "additions": 2}],
        "config": {"critical_patterns": [{"keyword": "billing", "weight": 50}],
                   "reviewer_routes": [{"keyword": "billing", "team": "payments-team"}]}}"#,
  ) {
    Output::PullRequest(out) => out,
    Output::Impact(_) => panic!("expected pull-request output"),
  };
  // 50 + (5 + 1) * 0.3
  assert_eq!(out.report.risk_score, 51.8);
  assert_eq!(out.report.criticality, Criticality::Medium);
  assert!(out.report.recommended_reviewer_groups.contains("payments-team"));
}

#[test]
fn impact_request_ranks_and_gates() {
  let out = match run_json(
    r#"{"kind": "impact", "threshold": 0.5, "files": [
      {"path": "a.py", "additions": 10, "churn": 1, "ownership_risk": 0.1},
      {"path": "b.py", "additions": 500, "churn": 15, "ownership_risk": 0.9},
      {"path": "c.py", "additions": 50, "churn": 2, "ownership_risk": 0.2}
    ]}"#,
  ) {
    Output::Impact(out) => out,
    Output::PullRequest(_) => panic!("expected impact output"),
  };
  let order: Vec<&str> = out.candidates.iter().map(|c| c.path.as_str()).collect();
  assert_eq!(order, vec!["b.py", "c.py", "a.py"]);
  assert!((out.impact.aggregate_score - 0.905).abs() < 1e-9);
  let verdict = out.verdict.unwrap();
  assert!(!verdict.ok);
}

#[test]
fn impact_without_threshold_has_no_verdict() {
  let out = match run_json(r#"{"kind": "impact", "files": []}"#) {
    Output::Impact(out) => out,
    Output::PullRequest(_) => panic!("expected impact output"),
  };
  assert_eq!(out.impact.aggregate_score, 0.0);
  assert!(out.verdict.is_none());
  let json = serde_json::to_value(&out).unwrap();
  assert!(json.get("verdict").is_none());
}
