//! Hardcoded-secret detection in patch text.
//!
//! The default heuristic is coarse (keyword plus any `=` anywhere in the
//! patch) and fires on ordinary assignments. It sits behind [`SecretScanner`]
//! so a real scanner can replace it without touching the classifier.

/// Decides whether a patch looks like it introduces a secret.
pub trait SecretScanner {
  fn flags(&self, patch: &str) -> bool;
}

/// Flags a patch that mentions any keyword (case-insensitive) and contains `=`.
#[derive(Debug, Clone)]
pub struct KeywordAssignmentScanner {
  keywords: Vec<String>,
}

impl KeywordAssignmentScanner {
  pub fn new(keywords: &[String]) -> Self {
    Self {
      keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
    }
  }
}

impl SecretScanner for KeywordAssignmentScanner {
  fn flags(&self, patch: &str) -> bool {
    if patch.is_empty() || !patch.contains('=') {
      return false;
    }
    let lower = patch.to_lowercase();
    self.keywords.iter().any(|k| lower.contains(k.as_str()))
  }
}

/// Never flags anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecretScan;

impl SecretScanner for NoSecretScan {
  fn flags(&self, _patch: &str) -> bool {
    false
  }
}
