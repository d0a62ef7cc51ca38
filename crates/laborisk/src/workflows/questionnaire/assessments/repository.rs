use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::super::batch::Batch;
use super::domain::{Assessment, AssessmentId, BatchId, ResponseSet};

/// Repository record pairing the assessment entity with its response
/// store. Dimension scores are always derived from this on demand, never
/// persisted as authoritative data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub assessment: Assessment,
    pub responses: ResponseSet,
}

impl AssessmentRecord {
    pub fn status_view(&self) -> AssessmentStatusView {
        AssessmentStatusView {
            assessment_id: self.assessment.id.clone(),
            status: self.assessment.status.label(),
            current_dimension: self.assessment.current_dimension,
            resume_anchor: self.assessment.resume_anchor,
            answered_items: self.responses.len(),
            submitted_at: self.assessment.submitted_at,
        }
    }
}

/// Storage abstraction so the progression and reporting paths can be
/// exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert_batch(&self, batch: Batch) -> Result<(), RepositoryError>;
    fn fetch_batch(&self, id: &BatchId) -> Result<Option<Batch>, RepositoryError>;
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn list_by_batch(&self, batch_id: &BatchId) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Progression status exposed to the client so it can run resume
/// detection and render the right dimension.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub status: &'static str,
    pub current_dimension: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_anchor: Option<u8>,
    pub answered_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<NaiveDateTime>,
}
