//! Validation issues produced while gating the guided creation wizard.

use serde::{Deserialize, Serialize};

/// How serious an issue is. Only errors block progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
}

/// A single human-readable finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidedValidationIssue {
    pub severity: Severity,
    pub message: String,
}

impl GuidedValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Ordered list of issues; the first error is the most specific blocker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub issues: Vec<GuidedValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: GuidedValidationIssue) {
        self.issues.push(issue);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(GuidedValidationIssue::error(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(GuidedValidationIssue::warning(message));
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(GuidedValidationIssue::is_error)
    }

    pub fn first_error(&self) -> Option<&str> {
        self.issues
            .iter()
            .find(|issue| issue.is_error())
            .map(|issue| issue.message.as_str())
    }

    pub fn errors(&self) -> impl Iterator<Item = &GuidedValidationIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_count_as_errors() {
        let mut report = ValidationReport::new();
        report.warning("Give your character a name");
        assert!(!report.has_errors());
        assert_eq!(report.first_error(), None);

        report.error("Select a class");
        report.error("Select a race");
        assert!(report.has_errors());
        assert_eq!(report.first_error(), Some("Select a class"));
        assert_eq!(report.errors().count(), 2);
    }
}
