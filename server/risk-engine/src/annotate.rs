//! Reviewer-facing annotations and summary text derived from a report.

use crate::types::{Annotation, FindingKind, PullRequestReport, Severity};

/// One-line summary of a classified pull request.
pub fn summary(report: &PullRequestReport) -> String {
  format!(
    "{} {} risk: {} files changed (+{} / -{}), risk {:.0}/100, complexity {:.0}/100",
    report.criticality.marker(),
    report.criticality.as_str(),
    report.files.changed,
    report.lines.added,
    report.lines.deleted,
    report.risk_score,
    report.complexity_score
  )
}

/// Summary annotation (severity from the criticality tier), one per security
/// finding, then informational notes for missing tests/docs.
pub fn annotations(report: &PullRequestReport) -> Vec<Annotation> {
  let mut out = vec![Annotation {
    path: None,
    message: summary(report),
    severity: report.criticality.severity(),
  }];

  for finding in &report.security_findings {
    let severity = match finding.kind {
      FindingKind::HardcodedSecret => Severity::Error,
      FindingKind::SensitiveFile | FindingKind::SchemaWithoutMigration => Severity::Warning,
    };
    out.push(Annotation {
      path: finding.path.clone(),
      message: finding.message(),
      severity,
    });
  }

  if report.missing_tests {
    out.push(Annotation {
      path: None,
      message: "Code changed without accompanying tests".to_string(),
      severity: Severity::Info,
    });
  }
  if report.missing_docs {
    out.push(Annotation {
      path: None,
      message: "Documentation not updated for a multi-file change".to_string(),
      severity: Severity::Info,
    });
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classify::classify_pull_request;
  use crate::config::ClassifierConfig;
  use crate::types::{ChangedFile, FileStatus};

  #[test]
  fn empty_report_has_info_summary_only() {
    let report = classify_pull_request(&[], &ClassifierConfig::default());
    let notes = annotations(&report);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Info);
    assert!(notes[0].message.contains("low risk: 0 files changed"));
  }

  #[test]
  fn findings_carry_path_and_severity() {
    let files = vec![
      ChangedFile::new("deploy/.env.production", FileStatus::Modified, 2, 0),
      ChangedFile::new("src/pay.py", FileStatus::Modified, 2, 0).with_patch("+secret = 'x'"),
    ];
    let report = classify_pull_request(&files, &ClassifierConfig::default());
    let notes = annotations(&report);

    let env = notes
      .iter()
      .find(|a| a.path.as_deref() == Some("deploy/.env.production"))
      .unwrap();
    assert_eq!(env.severity, Severity::Warning);

    let secret = notes
      .iter()
      .find(|a| a.message.starts_with("🔒 Potential hardcoded secret"))
      .unwrap();
    assert_eq!(secret.severity, Severity::Error);
    assert_eq!(secret.path.as_deref(), Some("src/pay.py"));

    assert!(notes.iter().any(|a| a.message.contains("without accompanying tests")));
  }
}
