//! Axum route handlers for the Analyzer API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, AnalysisSummary};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub message: String,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct AnalysesResponse {
    pub analyses: Vec<AnalysisSummary>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/analyze-resume
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<AnalyzeResponse>), AppError> {
    let analysis = state
        .analyzer
        .analyze(request.user_id, request.resume_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AnalyzeResponse {
            message: "Resume analyzed successfully".to_string(),
            analysis,
        }),
    ))
}

/// GET /api/v1/ai/analysis/:resume_id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let analysis = state
        .analyzer
        .get_analysis(params.user_id, resume_id)
        .await?;
    Ok(Json(AnalysisResponse { analysis }))
}

/// GET /api/v1/ai/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysesResponse>, AppError> {
    let analyses = state.analyzer.list_analyses(params.user_id).await?;
    Ok(Json(AnalysesResponse { analyses }))
}

/// DELETE /api/v1/ai/analysis/:analysis_id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .analyzer
        .delete_analysis(params.user_id, analysis_id)
        .await?;
    Ok(Json(MessageResponse {
        message: "Analysis deleted successfully".to_string(),
    }))
}
