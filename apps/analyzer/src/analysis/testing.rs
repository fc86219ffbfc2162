//! In-memory stores, a canned completion client and a recording observer for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::analysis::observer::AnalysisObserver;
use crate::analysis::recovery::{Recovered, RecoveryError};
use crate::analysis::repository::{AnalysisRepository, ResumeStore};
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, LlmError};
use crate::models::analysis::{AnalysisResult, AnalysisSummary};
use crate::models::resume::{ResumeRecord, ResumeRow};

pub fn resume_row(user_id: Uuid, record: ResumeRecord) -> ResumeRow {
    let now = Utc::now();
    ResumeRow {
        id: Uuid::new_v4(),
        user_id,
        title: "My Resume".to_string(),
        data: Json(record),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct InMemoryResumes {
    rows: Mutex<Vec<ResumeRow>>,
}

impl InMemoryResumes {
    pub fn add(&self, row: ResumeRow) -> Uuid {
        let id = row.id;
        self.rows.lock().unwrap().push(row);
        id
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumes {
    async fn get_resume(&self, resume_id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == resume_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryAnalyses {
    rows: Mutex<Vec<AnalysisResult>>,
}

impl InMemoryAnalyses {
    /// Everything stored, in insertion order.
    pub fn all(&self) -> Vec<AnalysisResult> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalyses {
    async fn insert(&self, analysis: &AnalysisResult) -> Result<(), AppError> {
        self.rows.lock().unwrap().push(analysis.clone());
        Ok(())
    }

    async fn find(&self, analysis_id: Uuid) -> Result<Option<AnalysisResult>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == analysis_id)
            .cloned())
    }

    async fn latest_for_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<AnalysisResult>, AppError> {
        // Later inserts win timestamp ties.
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id && a.resume_id == resume_id)
            .fold(None, |best: Option<&AnalysisResult>, a| match best {
                Some(b) if b.created_at > a.created_at => Some(b),
                _ => Some(a),
            })
            .cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AnalysisSummary>, AppError> {
        let mut summaries: Vec<AnalysisSummary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .map(AnalysisSummary::from)
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn delete(&self, analysis_id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != analysis_id);
        Ok(rows.len() < before)
    }
}

/// Completion client that returns a fixed response and counts calls.
pub struct CannedCompletion {
    response: Option<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<(String, String)>>,
}

impl CannedCompletion {
    pub fn returning(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Every call fails as if the API were overloaded.
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<(String, String)> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for CannedCompletion {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some((system.to_string(), user.to_string()));
        self.response.clone().ok_or(LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    started: AtomicUsize,
    repaired: AtomicUsize,
    failures: AtomicUsize,
    stored: AtomicUsize,
}

impl RecordingObserver {
    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn repaired_count(&self) -> usize {
        self.repaired.load(Ordering::SeqCst)
    }

    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn stored_count(&self) -> usize {
        self.stored.load(Ordering::SeqCst)
    }
}

impl AnalysisObserver for RecordingObserver {
    fn analysis_started(&self, _user_id: Uuid, _resume_id: Uuid, _resume_chars: usize) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn response_recovered(&self, _resume_id: Uuid, recovered: &Recovered) {
        if recovered.repaired {
            self.repaired.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn recovery_failed(&self, _resume_id: Uuid, _error: &RecoveryError, _response_chars: usize) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn analysis_stored(&self, _analysis: &AnalysisResult) {
        self.stored.fetch_add(1, Ordering::SeqCst);
    }
}
