//! Analysis pipeline: orchestrates one analysis request end to end.
//!
//! Flow: load résumé → ownership check → resume_to_text → build prompt →
//!       complete → recover JSON → normalize → build record → insert.
//!
//! Ownership is checked before the model is called. The model call is never
//! retried here, and a recovery failure writes nothing.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::analysis::normalize::{normalize_findings, IssueDraft, SuggestionDraft};
use crate::analysis::observer::AnalysisObserver;
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::recovery::recover_analysis_json;
use crate::analysis::repository::{AnalysisRepository, ResumeStore};
use crate::analysis::serializer::resume_to_text;
use crate::errors::AppError;
use crate::llm_client::CompletionClient;
use crate::models::analysis::{AnalysisResult, AnalysisSummary};
use crate::models::lenient::{items_from_value, score_from_value};

#[derive(Clone)]
pub struct Analyzer {
    resumes: Arc<dyn ResumeStore>,
    analyses: Arc<dyn AnalysisRepository>,
    llm: Arc<dyn CompletionClient>,
    observer: Arc<dyn AnalysisObserver>,
}

impl Analyzer {
    pub fn new(
        resumes: Arc<dyn ResumeStore>,
        analyses: Arc<dyn AnalysisRepository>,
        llm: Arc<dyn CompletionClient>,
        observer: Arc<dyn AnalysisObserver>,
    ) -> Self {
        Self {
            resumes,
            analyses,
            llm,
            observer,
        }
    }

    /// Runs a fresh analysis and stores it as a new record.
    pub async fn analyze(&self, user_id: Uuid, resume_id: Uuid) -> Result<AnalysisResult, AppError> {
        let resume = self
            .resumes
            .get_resume(resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

        if resume.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        let resume_text = resume_to_text(&resume.data);
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Resume has no content to analyze. Fill in at least one section first.".to_string(),
            ));
        }
        self.observer
            .analysis_started(user_id, resume_id, resume_text.chars().count());

        let prompt = build_analysis_prompt(&resume_text);
        let raw_analysis = self
            .llm
            .complete(&prompt.system, &prompt.user)
            .await
            .map_err(|e| AppError::Llm(format!("Resume analysis call failed: {e}")))?;

        let recovered = match recover_analysis_json(&raw_analysis) {
            Ok(recovered) => recovered,
            Err(e) => {
                self.observer
                    .recovery_failed(resume_id, &e, raw_analysis.chars().count());
                return Err(AppError::Recovery(e));
            }
        };
        self.observer.response_recovered(resume_id, &recovered);

        let analysis = build_analysis(
            user_id,
            resume_id,
            resume_text,
            &recovered.object,
            raw_analysis,
        );

        self.analyses.insert(&analysis).await?;
        self.observer.analysis_stored(&analysis);

        Ok(analysis)
    }

    /// Newest analysis of a résumé owned by the user.
    pub async fn get_analysis(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<AnalysisResult, AppError> {
        self.analyses
            .latest_for_resume(user_id, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No analysis found for resume {resume_id}")))
    }

    pub async fn list_analyses(&self, user_id: Uuid) -> Result<Vec<AnalysisSummary>, AppError> {
        self.analyses.list_for_user(user_id).await
    }

    /// Permanently deletes an analysis owned by the user.
    pub async fn delete_analysis(&self, user_id: Uuid, analysis_id: Uuid) -> Result<(), AppError> {
        let analysis = self
            .analyses
            .find(analysis_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Analysis {analysis_id} not found")))?;

        if analysis.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        if !self.analyses.delete(analysis_id).await? {
            return Err(AppError::NotFound(format!("Analysis {analysis_id} not found")));
        }
        Ok(())
    }
}

/// Builds the record from a recovered object. List fields keep every entry
/// that parses; object fields fall back to their empty value only when the
/// whole value is missing or not an object. Scores fall back to 0.
fn build_analysis(
    user_id: Uuid,
    resume_id: Uuid,
    resume_text: String,
    object: &Map<String, Value>,
    raw_analysis: String,
) -> AnalysisResult {
    let issues: Vec<IssueDraft> = list_field(object, "issues");
    let suggestions: Vec<SuggestionDraft> = list_field(object, "suggestions");
    let (issues, suggestions) = normalize_findings(issues, suggestions);

    AnalysisResult {
        id: Uuid::new_v4(),
        user_id,
        resume_id,
        resume_text,
        overall_score: score_field(object, "overallScore"),
        ats_score: score_field(object, "atsScore"),
        content_score: score_field(object, "contentScore"),
        format_score: score_field(object, "formatScore"),
        strengths: list_field(object, "strengths"),
        issues,
        suggestions,
        keyword_analysis: field_or_default(object, "keywordAnalysis"),
        sections: field_or_default(object, "sections"),
        formatting: field_or_default(object, "formatting"),
        ats_compatibility: field_or_default(object, "atsCompatibility"),
        raw_analysis,
        created_at: Utc::now(),
    }
}

fn field_or_default<T: DeserializeOwned + Default>(object: &Map<String, Value>, key: &str) -> T {
    object
        .get(key)
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

fn list_field<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Vec<T> {
    object
        .get(key)
        .map(|v| items_from_value(v.clone()))
        .unwrap_or_default()
}

/// Reads a 0–100 score, accepting numeric strings. Anything else is 0.
fn score_field(object: &Map<String, Value>, key: &str) -> f64 {
    object.get(key).and_then(score_from_value).unwrap_or(0.0)
}
