//! Pull-request risk classification from the changed-file list.
//!
//! Stateless: every field of the report is a reduction over the input.
//! Never fails; an empty list yields a zero-risk, low-tier report.

use std::collections::BTreeSet;

use crate::config::ClassifierConfig;
use crate::normalize::round2;
use crate::secrets::{KeywordAssignmentScanner, SecretScanner};
use crate::types::*;

/// Classify with the default keyword/assignment secret heuristic.
pub fn classify_pull_request(files: &[ChangedFile], config: &ClassifierConfig) -> PullRequestReport {
  let scanner = KeywordAssignmentScanner::new(&config.secret_keywords);
  classify_with_scanner(files, config, &scanner)
}

/// Classify using a caller-supplied secret scanner.
pub fn classify_with_scanner(
  files: &[ChangedFile],
  config: &ClassifierConfig,
  scanner: &dyn SecretScanner,
) -> PullRequestReport {
  let lowered: Vec<String> = files.iter().map(|f| f.filename.to_lowercase()).collect();

  let counts = file_counts(files);
  let lines = LineCounts {
    added: files.iter().map(|f| f.additions as u64).sum(),
    deleted: files.iter().map(|f| f.deletions as u64).sum(),
  };

  let complexity = complexity_score(counts.changed, lines);
  let risk = risk_score(counts.changed, lines, &lowered, complexity, config);
  let criticality = tier(risk, config);

  let missing_tests = missing_tests(files, &lowered, config);
  let missing_docs = missing_docs(&lowered, config);
  let findings = security_findings(files, &lowered, config, scanner);

  let suggestions = suggestions(
    &SuggestionInputs {
      missing_tests,
      missing_docs,
      risk,
      lines,
      counts,
      has_security_findings: !findings.is_empty(),
    },
    config,
  );

  let report = PullRequestReport {
    risk_score: round2(risk),
    complexity_score: round2(complexity),
    criticality,
    files: counts,
    lines,
    impact_areas: files.iter().map(|f| f.filename.clone()).collect(),
    file_extensions: file_extensions(files),
    missing_tests,
    missing_docs,
    security_warnings: findings.iter().map(SecurityFinding::message).collect(),
    security_findings: findings,
    suggestions,
    recommended_reviewer_groups: reviewer_groups(&lowered, config),
  };

  tracing::debug!(
    files = report.files.changed,
    risk = report.risk_score,
    complexity = report.complexity_score,
    criticality = report.criticality.as_str(),
    "classified pull request"
  );

  report
}

fn file_counts(files: &[ChangedFile]) -> FileCounts {
  let mut counts = FileCounts {
    changed: files.len(),
    ..FileCounts::default()
  };
  for f in files {
    match f.status {
      FileStatus::Added => counts.added += 1,
      FileStatus::Modified => counts.modified += 1,
      FileStatus::Removed => counts.removed += 1,
      FileStatus::Renamed => counts.renamed += 1,
      FileStatus::Other => {}
    }
  }
  counts
}

/// Review-burden proxy in [0, 100].
pub fn complexity_score(file_count: usize, lines: LineCounts) -> f64 {
  let raw = file_count as f64 * 5.0 + lines.added as f64 / 2.0 + lines.deleted as f64 / 3.0;
  raw.min(100.0)
}

/// Additive risk (file count, additions, critical paths) blended with complexity, capped at 100.
pub fn risk_score(
  file_count: usize,
  lines: LineCounts,
  lowered_paths: &[String],
  complexity: f64,
  config: &ClassifierConfig,
) -> f64 {
  let mut risk = 0.0;

  if file_count > config.very_many_files {
    risk += config.very_many_files_points;
  } else if file_count > config.many_files {
    risk += config.many_files_points;
  }

  if lines.added > config.very_large_additions {
    risk += config.very_large_additions_points;
  } else if lines.added > config.large_additions {
    risk += config.large_additions_points;
  }

  for path in lowered_paths {
    risk += critical_path_weight(path, config) as f64;
  }

  (risk + complexity * config.complexity_blend).min(100.0)
}

/// Weight of the first critical keyword found in a lower-cased path, else 0.
pub fn critical_path_weight(lowered_path: &str, config: &ClassifierConfig) -> u32 {
  config
    .critical_patterns
    .iter()
    .find(|p| lowered_path.contains(p.keyword.as_str()))
    .map(|p| p.weight)
    .unwrap_or(0)
}

pub fn tier(risk: f64, config: &ClassifierConfig) -> Criticality {
  if risk < config.medium_tier_at {
    Criticality::Low
  } else if risk < config.high_tier_at {
    Criticality::Medium
  } else {
    Criticality::High
  }
}

fn missing_tests(files: &[ChangedFile], lowered: &[String], config: &ClassifierConfig) -> bool {
  let has_tests = lowered.iter().any(|p| p.contains(config.test_marker.as_str()));
  // Extension match is case-sensitive on the reported filename.
  let has_code_changes = files
    .iter()
    .filter(|f| matches!(f.status, FileStatus::Added | FileStatus::Modified))
    .any(|f| {
      config
        .code_extensions
        .iter()
        .any(|ext| f.filename.ends_with(ext.as_str()))
    });
  has_code_changes && !has_tests
}

fn missing_docs(lowered: &[String], config: &ClassifierConfig) -> bool {
  let has_docs = lowered.iter().any(|p| {
    p.ends_with(".md") || config.doc_markers.iter().any(|m| p.contains(m.as_str()))
  });
  lowered.len() > config.docs_min_files && !has_docs
}

fn security_findings(
  files: &[ChangedFile],
  lowered: &[String],
  config: &ClassifierConfig,
  scanner: &dyn SecretScanner,
) -> Vec<SecurityFinding> {
  let mut findings = Vec::new();

  for (file, path) in files.iter().zip(lowered) {
    if config.sensitive_patterns.iter().any(|p| path.contains(p.as_str())) {
      findings.push(SecurityFinding {
        kind: FindingKind::SensitiveFile,
        path: Some(file.filename.clone()),
      });
    }
  }

  for file in files {
    let patch = file.patch.as_deref().unwrap_or_default();
    if scanner.flags(patch) {
      findings.push(SecurityFinding {
        kind: FindingKind::HardcodedSecret,
        path: Some(file.filename.clone()),
      });
    }
  }

  let touches_schema = lowered
    .iter()
    .any(|p| config.schema_markers.iter().any(|m| p.contains(m.as_str())));
  let has_migration = lowered
    .iter()
    .any(|p| p.contains(config.migration_marker.as_str()));
  if touches_schema && !has_migration {
    findings.push(SecurityFinding {
      kind: FindingKind::SchemaWithoutMigration,
      path: None,
    });
  }

  findings
}

struct SuggestionInputs {
  missing_tests: bool,
  missing_docs: bool,
  risk: f64,
  lines: LineCounts,
  counts: FileCounts,
  has_security_findings: bool,
}

/// Fixed precedence: tests, docs, risk tier, line volume, file count,
/// added files, removed files, security.
fn suggestions(inputs: &SuggestionInputs, config: &ClassifierConfig) -> Vec<String> {
  let mut out = Vec::new();

  if inputs.missing_tests {
    out.push("Add unit tests for the modified code".to_string());
  }
  if inputs.missing_docs {
    out.push("Update documentation to reflect changes".to_string());
  }

  if inputs.risk > config.split_suggestion_above {
    out.push("High risk PR - consider splitting into smaller changes".to_string());
  } else if inputs.risk > config.reviewers_suggestion_above {
    out.push("Medium-high risk - request additional reviewers".to_string());
  }

  if inputs.lines.added > config.large_additions_suggestion_above {
    out.push("Large code additions - ensure code review coverage".to_string());
  }
  if inputs.counts.changed > config.file_count_suggestion_above {
    out.push(format!(
      "PR touches {} files - consider breaking into focused PRs",
      inputs.counts.changed
    ));
  }
  if inputs.counts.added > config.added_files_suggestion_above {
    out.push(format!(
      "{} new files added - verify they follow project structure",
      inputs.counts.added
    ));
  }
  if inputs.counts.removed > 0 {
    out.push(format!(
      "{} files removed - ensure no breaking changes",
      inputs.counts.removed
    ));
  }
  if inputs.has_security_findings {
    out.push("Security review recommended due to sensitive file changes".to_string());
  }

  out
}

fn reviewer_groups(lowered: &[String], config: &ClassifierConfig) -> BTreeSet<String> {
  let mut groups = BTreeSet::new();
  for path in lowered {
    for route in &config.reviewer_routes {
      if path.contains(route.keyword.as_str()) {
        groups.insert(route.team.clone());
      }
    }
  }
  groups
}

fn file_extensions(files: &[ChangedFile]) -> Vec<String> {
  let exts: BTreeSet<String> = files
    .iter()
    .filter_map(|f| f.filename.rsplit_once('.').map(|(_, ext)| ext.to_string()))
    .collect();
  exts.into_iter().collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::secrets::NoSecretScan;

  fn cfg() -> ClassifierConfig {
    ClassifierConfig::default()
  }

  fn modified(name: &str, additions: u32) -> ChangedFile {
    ChangedFile::new(name, FileStatus::Modified, additions, 0)
  }

  #[test]
  fn empty_list_is_low_risk() {
    let r = classify_pull_request(&[], &cfg());
    assert_eq!(r.risk_score, 0.0);
    assert_eq!(r.complexity_score, 0.0);
    assert_eq!(r.criticality, Criticality::Low);
    assert!(!r.missing_tests);
    assert!(!r.missing_docs);
    assert!(r.security_warnings.is_empty());
    assert!(r.suggestions.is_empty());
    assert!(r.recommended_reviewer_groups.is_empty());
    assert_eq!(r.files, FileCounts::default());
  }

  #[test]
  fn env_and_config_scenario() {
    let files = vec![modified(".env", 0), modified("config/db.py", 50)];
    let r = classify_pull_request(&files, &cfg());

    // complexity = 2*5 + 50/2 = 35; risk = 25 + 15 + 35*0.3 = 50.5
    assert_eq!(r.complexity_score, 35.0);
    assert_eq!(r.risk_score, 50.5);
    assert!(r.risk_score >= 25.0);
    assert_eq!(r.criticality, Criticality::Medium);
    assert!(r.missing_tests);
    assert!(r
      .security_warnings
      .iter()
      .any(|w| w.contains("Sensitive") && w.contains(".env")));
    assert_eq!(r.suggestions[0], "Add unit tests for the modified code");
    assert!(r
      .suggestions
      .contains(&"Medium-high risk - request additional reviewers".to_string()));
  }

  #[test]
  fn large_pr_scenario_is_high() {
    let mut files: Vec<ChangedFile> = (0..25).map(|i| modified(&format!("src/m{}.rs", i), 0)).collect();
    files[0].additions = 1200;
    let r = classify_pull_request(&files, &cfg());
    assert_eq!(r.complexity_score, 100.0);
    assert_eq!(r.risk_score, 100.0);
    assert_eq!(r.criticality, Criticality::High);
    assert_eq!(r.lines.added, 1200);
  }

  #[test]
  fn critical_keyword_counts_once_per_file() {
    // "auth" and "config" both match; only the first in table order counts.
    let lowered = vec!["src/auth/config.ts".to_string()];
    let c = cfg();
    assert_eq!(critical_path_weight(&lowered[0], &c), 20);
    let risk = risk_score(1, LineCounts::default(), &lowered, 0.0, &c);
    assert_eq!(risk, 20.0);
  }

  #[test]
  fn tier_boundaries() {
    let c = cfg();
    assert_eq!(tier(29.99, &c), Criticality::Low);
    assert_eq!(tier(30.0, &c), Criticality::Medium);
    assert_eq!(tier(69.99, &c), Criticality::Medium);
    assert_eq!(tier(70.0, &c), Criticality::High);
  }

  #[test]
  fn file_count_and_addition_steps() {
    let c = cfg();
    let lines = |added| LineCounts { added, deleted: 0 };
    assert_eq!(risk_score(11, lines(0), &[], 0.0, &c), 20.0);
    assert_eq!(risk_score(21, lines(0), &[], 0.0, &c), 30.0);
    assert_eq!(risk_score(1, lines(501), &[], 0.0, &c), 30.0);
    assert_eq!(risk_score(1, lines(1001), &[], 0.0, &c), 40.0);
    assert_eq!(risk_score(10, lines(500), &[], 0.0, &c), 0.0);
  }

  #[test]
  fn tests_present_clears_missing_tests() {
    let files = vec![modified("app/service.py", 10), modified("tests/test_service.py", 5)];
    assert!(!classify_pull_request(&files, &cfg()).missing_tests);
  }

  #[test]
  fn removed_code_does_not_need_tests() {
    let files = vec![ChangedFile::new("app/old.py", FileStatus::Removed, 0, 40)];
    let r = classify_pull_request(&files, &cfg());
    assert!(!r.missing_tests);
    assert_eq!(r.files.removed, 1);
    assert!(r.suggestions.iter().any(|s| s.starts_with("1 files removed")));
  }

  #[test]
  fn missing_docs_needs_more_than_five_files() {
    let five: Vec<_> = (0..5).map(|i| modified(&format!("lib/a{}.c", i), 1)).collect();
    assert!(!classify_pull_request(&five, &cfg()).missing_docs);

    let mut six: Vec<_> = (0..6).map(|i| modified(&format!("lib/a{}.c", i), 1)).collect();
    assert!(classify_pull_request(&six, &cfg()).missing_docs);

    six.push(modified("CHANGELOG.md", 1));
    assert!(!classify_pull_request(&six, &cfg()).missing_docs);
  }

  #[test]
  fn hardcoded_secret_uses_scanner_policy() {
    let files = vec![modified("src/client.ts", 3).with_patch("+const API_KEY = \"abc\"")];
    let r = classify_pull_request(&files, &cfg());
    assert!(r
      .security_findings
      .iter()
      .any(|f| f.kind == FindingKind::HardcodedSecret));

    let quiet = classify_with_scanner(&files, &cfg(), &NoSecretScan);
    assert!(quiet.security_findings.is_empty());
  }

  #[test]
  fn schema_change_without_migration_warns_once() {
    let files = vec![modified("app/models/user.py", 4), modified("app/schema.graphql", 2)];
    let r = classify_pull_request(&files, &cfg());
    let schema: Vec<_> = r
      .security_findings
      .iter()
      .filter(|f| f.kind == FindingKind::SchemaWithoutMigration)
      .collect();
    assert_eq!(schema.len(), 1);

    let with_migration = vec![
      modified("app/models/user.py", 4),
      ChangedFile::new("db/migrations/0042_user.py", FileStatus::Added, 20, 0),
    ];
    let r = classify_pull_request(&with_migration, &cfg());
    assert!(r
      .security_findings
      .iter()
      .all(|f| f.kind != FindingKind::SchemaWithoutMigration));
  }

  #[test]
  fn reviewer_routing_deduplicates() {
    let files = vec![
      modified("backend/api/routes.py", 1),
      modified("backend/api/handlers.py", 1),
      modified("frontend/App.tsx", 1),
    ];
    let groups: Vec<String> = classify_pull_request(&files, &cfg())
      .recommended_reviewer_groups
      .into_iter()
      .collect();
    assert_eq!(groups, vec!["api-team", "backend-team", "frontend-team"]);
  }

  #[test]
  fn suggestion_precedence() {
    let mut files: Vec<ChangedFile> = (0..12)
      .map(|i| ChangedFile::new(format!("src/new{}.js", i), FileStatus::Added, 60, 0))
      .collect();
    files.push(ChangedFile::new("src/gone.js", FileStatus::Removed, 0, 10));
    files.push(modified("secrets/token.txt", 1));
    files.extend((0..3).map(|i| modified(&format!("src/x{}.js", i), 1)));
    let r = classify_pull_request(&files, &cfg());

    let expected_order = [
      "Add unit tests",
      "Update documentation",
      "High risk PR",
      "Large code additions",
      "PR touches 17 files",
      "12 new files added",
      "1 files removed",
      "Security review",
    ];
    assert_eq!(r.suggestions.len(), expected_order.len());
    for (s, prefix) in r.suggestions.iter().zip(expected_order) {
      assert!(s.starts_with(prefix), "{} !~ {}", s, prefix);
    }
  }

  #[test]
  fn unknown_status_and_missing_fields_default() {
    let files: Vec<ChangedFile> =
      serde_json::from_str(r#"[{"filename": "a.py", "status": "copied"}, {}]"#).unwrap();
    assert_eq!(files[0].status, FileStatus::Other);
    assert_eq!(files[1].filename, "");
    let r = classify_pull_request(&files, &cfg());
    assert_eq!(r.files.changed, 2);
    assert_eq!(r.files.modified, 0);
    assert!(!r.missing_tests);
  }

  #[test]
  fn absent_status_lands_in_no_bucket() {
    let files: Vec<ChangedFile> =
      serde_json::from_str(r#"[{"filename": "app/service.py", "additions": 3}]"#).unwrap();
    assert_eq!(files[0].status, FileStatus::Other);
    let r = classify_pull_request(&files, &cfg());
    assert_eq!(r.files.changed, 1);
    assert_eq!(r.files, FileCounts { changed: 1, ..FileCounts::default() });
    assert!(!r.missing_tests);
    assert_eq!(r.lines.added, 3);
  }

  #[test]
  fn suggestion_and_warning_wording() {
    let mut files: Vec<ChangedFile> = (0..12)
      .map(|i| ChangedFile::new(format!("src/new{}.js", i), FileStatus::Added, 60, 0))
      .collect();
    files.push(ChangedFile::new("src/gone.js", FileStatus::Removed, 0, 10));
    files.push(modified("secrets/token.txt", 1).with_patch("+token = 'x'"));
    files.push(modified("app/models/user.py", 1));
    files.extend((0..3).map(|i| modified(&format!("src/x{}.js", i), 1)));
    let r = classify_pull_request(&files, &cfg());

    assert_eq!(
      r.suggestions,
      vec![
        "Add unit tests for the modified code",
        "Update documentation to reflect changes",
        "High risk PR - consider splitting into smaller changes",
        "Large code additions - ensure code review coverage",
        "PR touches 18 files - consider breaking into focused PRs",
        "12 new files added - verify they follow project structure",
        "1 files removed - ensure no breaking changes",
        "Security review recommended due to sensitive file changes",
      ]
    );
    assert_eq!(
      r.security_warnings,
      vec![
        "⚠️ Sensitive file: secrets/token.txt",
        "🔒 Potential hardcoded secret in: secrets/token.txt",
        "⚠️ Database schema changes detected without migrations",
      ]
    );
  }

  #[test]
  fn several_matching_patterns_flag_a_file_once() {
    let files = vec![
      modified("deploy/secret_token.env", 2).with_patch("+password=hunter2\n+token=abc"),
    ];
    let r = classify_pull_request(&files, &cfg());
    let count = |kind| r.security_findings.iter().filter(|f| f.kind == kind).count();
    assert_eq!(count(FindingKind::SensitiveFile), 1);
    assert_eq!(count(FindingKind::HardcodedSecret), 1);
    assert_eq!(r.security_warnings.len(), 2);
  }

  #[test]
  fn test_and_doc_markers_ignore_case() {
    let files = vec![modified("app/Service.py", 10), modified("Tests/Service.py", 5)];
    assert!(!classify_pull_request(&files, &cfg()).missing_tests);

    let mut files: Vec<_> = (0..6).map(|i| modified(&format!("lib/a{}.c", i), 1)).collect();
    files.push(modified("README", 1));
    assert!(!classify_pull_request(&files, &cfg()).missing_docs);
  }

  #[test]
  fn code_extension_match_is_case_sensitive() {
    let files = vec![modified("app/Main.PY", 10)];
    assert!(!classify_pull_request(&files, &cfg()).missing_tests);
  }

  #[test]
  fn extensions_are_distinct_and_sorted() {
    let files = vec![modified("b.ts", 1), modified("a.py", 1), modified("c.ts", 1), modified("Makefile", 1)];
    assert_eq!(classify_pull_request(&files, &cfg()).file_extensions, vec!["py", "ts"]);
  }
}
