use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::lenient;

/// Canonical issue severity. Only the normalizer turns model labels into these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

/// Canonical suggestion impact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Strength {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::optional_score")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub category: String,
    pub suggestion: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordAnalysis {
    #[serde(deserialize_with = "lenient::items")]
    pub present_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub missing_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient::score")]
    pub keyword_density: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub industry_relevance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionFeedback {
    #[serde(deserialize_with = "lenient::or_default")]
    pub present: bool,
    #[serde(deserialize_with = "lenient::score")]
    pub score: f64,
    #[serde(deserialize_with = "lenient::text")]
    pub feedback: String,
}

/// Per-section feedback, keyed by the fixed snake_case section names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    #[serde(deserialize_with = "lenient::or_default")]
    pub personal: SectionFeedback,
    #[serde(deserialize_with = "lenient::or_default")]
    pub professional_summary: SectionFeedback,
    #[serde(deserialize_with = "lenient::or_default")]
    pub experience: SectionFeedback,
    #[serde(deserialize_with = "lenient::or_default")]
    pub education: SectionFeedback,
    #[serde(deserialize_with = "lenient::or_default")]
    pub skills: SectionFeedback,
    #[serde(deserialize_with = "lenient::or_default")]
    pub projects: SectionFeedback,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Formatting {
    #[serde(deserialize_with = "lenient::or_default")]
    pub has_clear_structure: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub use_of_bullet_points: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub consistent_formatting: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub appropriate_length: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub feedback: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtsCompatibility {
    #[serde(deserialize_with = "lenient::score")]
    pub score: f64,
    #[serde(deserialize_with = "lenient::items")]
    pub warnings: Vec<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub recommendations: Vec<String>,
}

/// A persisted analysis. Immutable once written; re-analysis creates a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub resume_text: String,
    pub overall_score: f64,
    pub ats_score: f64,
    pub content_score: f64,
    pub format_score: f64,
    pub strengths: Vec<Strength>,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
    pub keyword_analysis: KeywordAnalysis,
    pub sections: Sections,
    pub formatting: Formatting,
    pub ats_compatibility: AtsCompatibility,
    pub raw_analysis: String,
    pub created_at: DateTime<Utc>,
}

/// List view of an analysis, used by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub resume_title: Option<String>,
    pub overall_score: f64,
    pub ats_score: f64,
    pub content_score: f64,
    pub format_score: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&AnalysisResult> for AnalysisSummary {
    fn from(analysis: &AnalysisResult) -> Self {
        AnalysisSummary {
            id: analysis.id,
            resume_id: analysis.resume_id,
            resume_title: None,
            overall_score: analysis.overall_score,
            ats_score: analysis.ats_score,
            content_score: analysis.content_score,
            format_score: analysis.format_score,
            created_at: analysis.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub resume_text: String,
    pub overall_score: f64,
    pub ats_score: f64,
    pub content_score: f64,
    pub format_score: f64,
    pub strengths: Json<Vec<Strength>>,
    pub issues: Json<Vec<Issue>>,
    pub suggestions: Json<Vec<Suggestion>>,
    pub keyword_analysis: Json<KeywordAnalysis>,
    pub sections: Json<Sections>,
    pub formatting: Json<Formatting>,
    pub ats_compatibility: Json<AtsCompatibility>,
    pub raw_analysis: String,
    pub created_at: DateTime<Utc>,
}

impl From<AnalysisRow> for AnalysisResult {
    fn from(row: AnalysisRow) -> Self {
        AnalysisResult {
            id: row.id,
            user_id: row.user_id,
            resume_id: row.resume_id,
            resume_text: row.resume_text,
            overall_score: row.overall_score,
            ats_score: row.ats_score,
            content_score: row.content_score,
            format_score: row.format_score,
            strengths: row.strengths.0,
            issues: row.issues.0,
            suggestions: row.suggestions.0,
            keyword_analysis: row.keyword_analysis.0,
            sections: row.sections.0,
            formatting: row.formatting.0,
            ats_compatibility: row.ats_compatibility.0,
            raw_analysis: row.raw_analysis,
            created_at: row.created_at,
        }
    }
}
