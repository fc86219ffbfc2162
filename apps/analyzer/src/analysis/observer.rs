//! Pipeline events, handed to the analyzer instead of logging through globals.

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::recovery::{Recovered, RecoveryError};
use crate::models::analysis::AnalysisResult;

pub trait AnalysisObserver: Send + Sync {
    fn analysis_started(&self, user_id: Uuid, resume_id: Uuid, resume_chars: usize);

    fn response_recovered(&self, resume_id: Uuid, recovered: &Recovered);

    fn recovery_failed(&self, resume_id: Uuid, error: &RecoveryError, response_chars: usize);

    fn analysis_stored(&self, analysis: &AnalysisResult);
}

/// Forwards pipeline events to `tracing`.
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn analysis_started(&self, user_id: Uuid, resume_id: Uuid, resume_chars: usize) {
        info!("Analyzing resume {resume_id} for user {user_id} ({resume_chars} chars)");
    }

    fn response_recovered(&self, resume_id: Uuid, recovered: &Recovered) {
        if recovered.repaired {
            warn!("Model response for resume {resume_id} was truncated; closing braces repaired");
        } else {
            info!("Model response for resume {resume_id} parsed cleanly");
        }
    }

    fn recovery_failed(&self, resume_id: Uuid, error: &RecoveryError, response_chars: usize) {
        warn!(
            "Could not recover analysis for resume {resume_id} ({}, {response_chars} chars): {:?}",
            error.kind(),
            error.preview()
        );
    }

    fn analysis_stored(&self, analysis: &AnalysisResult) {
        info!(
            "Stored analysis {}: overall={} ats={} issues={} suggestions={}",
            analysis.id,
            analysis.overall_score,
            analysis.ats_score,
            analysis.issues.len(),
            analysis.suggestions.len()
        );
    }
}
