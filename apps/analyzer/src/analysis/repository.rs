//! Storage seams for the analysis pipeline.
//!
//! `ResumeStore` reads résumés owned by the résumé CRUD service.
//! `AnalysisRepository` owns the `analyses` table: rows are inserted once and
//! never updated, only hard-deleted.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, AnalysisRow, AnalysisSummary};
use crate::models::resume::ResumeRow;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Looks a résumé up by id regardless of owner; callers check ownership.
    async fn get_resume(&self, resume_id: Uuid) -> Result<Option<ResumeRow>, AppError>;
}

#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Persists a new analysis. A failed insert leaves nothing behind.
    async fn insert(&self, analysis: &AnalysisResult) -> Result<(), AppError>;

    async fn find(&self, analysis_id: Uuid) -> Result<Option<AnalysisResult>, AppError>;

    /// Newest analysis of `resume_id` owned by `user_id`.
    async fn latest_for_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<AnalysisResult>, AppError>;

    /// All of a user's analyses, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AnalysisSummary>, AppError>;

    /// Returns false when nothing was deleted.
    async fn delete(&self, analysis_id: Uuid) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn get_resume(&self, resume_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
                .bind(resume_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[derive(Clone)]
pub struct PgAnalysisRepository {
    pool: PgPool,
}

impl PgAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for PgAnalysisRepository {
    async fn insert(&self, analysis: &AnalysisResult) -> Result<(), AppError> {
        // Single statement: the row is either fully visible or absent.
        sqlx::query(
            r#"
            INSERT INTO analyses
                (id, user_id, resume_id, resume_text,
                 overall_score, ats_score, content_score, format_score,
                 strengths, issues, suggestions, keyword_analysis,
                 sections, formatting, ats_compatibility,
                 raw_analysis, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(analysis.id)
        .bind(analysis.user_id)
        .bind(analysis.resume_id)
        .bind(&analysis.resume_text)
        .bind(analysis.overall_score)
        .bind(analysis.ats_score)
        .bind(analysis.content_score)
        .bind(analysis.format_score)
        .bind(Json(&analysis.strengths))
        .bind(Json(&analysis.issues))
        .bind(Json(&analysis.suggestions))
        .bind(Json(&analysis.keyword_analysis))
        .bind(Json(&analysis.sections))
        .bind(Json(&analysis.formatting))
        .bind(Json(&analysis.ats_compatibility))
        .bind(&analysis.raw_analysis)
        .bind(analysis.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, analysis_id: Uuid) -> Result<Option<AnalysisResult>, AppError> {
        let row = sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
            .bind(analysis_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(AnalysisResult::from))
    }

    async fn latest_for_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<AnalysisResult>, AppError> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT * FROM analyses
            WHERE user_id = $1 AND resume_id = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(resume_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(AnalysisResult::from))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AnalysisSummary>, AppError> {
        Ok(sqlx::query_as::<_, AnalysisSummary>(
            r#"
            SELECT a.id, a.resume_id, r.title AS resume_title,
                   a.overall_score, a.ats_score, a.content_score, a.format_score,
                   a.created_at
            FROM analyses a
            LEFT JOIN resumes r ON r.id = a.resume_id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, analysis_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM analyses WHERE id = $1")
            .bind(analysis_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
