//! Field normalization: maps the model's free-form severity and impact labels
//! onto the four-value vocabularies that get persisted.
//!
//! This is the only path from model output to `Issue` / `Suggestion`.

use serde::Deserialize;

use crate::models::analysis::{Impact, Issue, Severity, Suggestion};
use crate::models::lenient;

/// An issue as emitted by the model, before its severity is normalized.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueDraft {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub severity: Option<String>,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub suggestion: Option<String>,
}

/// A suggestion as emitted by the model, before its impact is normalized.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionDraft {
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::text")]
    pub suggestion: String,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub impact: Option<String>,
}

impl Severity {
    /// Unknown or absent labels fall back to `Medium`.
    pub fn from_label(label: Option<&str>) -> Severity {
        let label = label.map(|l| l.trim().to_ascii_lowercase());
        match label.as_deref() {
            Some("critical") => Severity::Critical,
            Some("high") | Some("warning") => Severity::High,
            Some("medium") | Some("moderate") => Severity::Medium,
            Some("low") | Some("minor") | Some("info") => Severity::Low,
            _ => Severity::Medium,
        }
    }
}

impl Impact {
    /// Only the canonical labels are recognized; anything else is `Medium`.
    pub fn from_label(label: Option<&str>) -> Impact {
        let label = label.map(|l| l.trim().to_ascii_lowercase());
        match label.as_deref() {
            Some("critical") => Impact::Critical,
            Some("high") => Impact::High,
            Some("low") => Impact::Low,
            _ => Impact::Medium,
        }
    }
}

pub fn normalize_findings(
    issues: Vec<IssueDraft>,
    suggestions: Vec<SuggestionDraft>,
) -> (Vec<Issue>, Vec<Suggestion>) {
    let issues = issues
        .into_iter()
        .map(|draft| Issue {
            severity: Severity::from_label(draft.severity.as_deref()),
            title: draft.title,
            description: draft.description,
            suggestion: draft.suggestion,
        })
        .collect();

    let suggestions = suggestions
        .into_iter()
        .map(|draft| Suggestion {
            impact: Impact::from_label(draft.impact.as_deref()),
            category: draft.category,
            suggestion: draft.suggestion,
        })
        .collect();

    (issues, suggestions)
}
