use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;

use super::super::batch::{Batch, BatchProgress, BatchReadinessView};
use super::super::catalog::QuestionnaireCatalog;
use super::super::report::assemble_batch_report;
use super::super::report::views::{BatchReport, IssuerSignature};
use super::domain::{
    Assessment, AssessmentId, BackNavigation, BatchId, DimensionSubmission, ResponseSet,
    SaveOutcome, Subject,
};
use super::progress::{NotFoundError, ProgressError};
use super::repository::{
    AssessmentRecord, AssessmentRepository, AssessmentStatusView, RepositoryError,
};

/// Service composing the questionnaire catalog, the progression state
/// machine, and the repository.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    catalog: Arc<QuestionnaireCatalog>,
    issuer: IssuerSignature,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static BATCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("assess-{id:06}"))
}

fn next_batch_id() -> BatchId {
    let id = BATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    BatchId(format!("batch-{id:04}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, issuer: IssuerSignature) -> Self {
        Self::with_catalog(
            repository,
            Arc::new(QuestionnaireCatalog::standard()),
            issuer,
        )
    }

    pub fn with_catalog(
        repository: Arc<R>,
        catalog: Arc<QuestionnaireCatalog>,
        issuer: IssuerSignature,
    ) -> Self {
        Self {
            repository,
            catalog,
            issuer,
        }
    }

    pub fn catalog(&self) -> &QuestionnaireCatalog {
        &self.catalog
    }

    /// Release event: one new batch plus one not-started assessment per
    /// roster subject.
    pub fn release_batch(
        &self,
        company: &str,
        subjects: Vec<Subject>,
        released_at: NaiveDateTime,
    ) -> Result<Batch, AssessmentServiceError> {
        let batch = Batch {
            id: next_batch_id(),
            company: company.to_string(),
            released_at,
        };
        self.repository.insert_batch(batch.clone())?;

        let subject_count = subjects.len();
        for subject in subjects {
            let record = AssessmentRecord {
                assessment: Assessment::released(
                    next_assessment_id(),
                    batch.id.clone(),
                    subject,
                    released_at,
                ),
                responses: ResponseSet::new(),
            };
            self.repository.insert(record)?;
        }

        info!(batch = %batch.id.0, company, subjects = subject_count, "questionnaire batch released");
        Ok(batch)
    }

    /// Subject opens their questionnaire for the first time.
    pub fn start(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let mut record = self.fetch_record(assessment_id)?;
        record.begin().map_err(ProgressError::from)?;
        self.repository.update(record.clone())?;
        Ok(record.status_view())
    }

    /// Persist one whole dimension of answers and advance the pointer.
    pub fn save_dimension(
        &self,
        assessment_id: &AssessmentId,
        submission: &DimensionSubmission,
        now: NaiveDateTime,
    ) -> Result<SaveOutcome, AssessmentServiceError> {
        let mut record = self.fetch_record(assessment_id)?;
        let outcome = record.save_dimension(&self.catalog, submission, now)?;
        self.repository.update(record)?;

        if outcome == SaveOutcome::Completed {
            info!(assessment = %assessment_id.0, "questionnaire completed");
        }

        Ok(outcome)
    }

    /// Status query consumed by the client to run resume detection.
    pub fn status(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentStatusView, AssessmentServiceError> {
        Ok(self.fetch_record(assessment_id)?.status_view())
    }

    /// Resume detection on (re)open; records the anchor at most once.
    pub fn reopen(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let mut record = self.fetch_record(assessment_id)?;
        if record.reopen().is_some() {
            self.repository.update(record.clone())?;
        }
        Ok(record.status_view())
    }

    /// Back-navigation request. A refusal is a valid outcome, not an
    /// error; nothing is written unless the pointer actually moved.
    pub fn navigate_back(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<BackNavigation, AssessmentServiceError> {
        let mut record = self.fetch_record(assessment_id)?;
        let navigation = record.navigate_back();
        if matches!(navigation, BackNavigation::MovedTo { .. }) {
            self.repository.update(record)?;
        }
        Ok(navigation)
    }

    /// Administrative removal of a subject from their batch.
    pub fn deactivate(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let mut record = self.fetch_record(assessment_id)?;
        record.deactivate().map_err(ProgressError::from)?;
        self.repository.update(record.clone())?;
        info!(assessment = %assessment_id.0, "assessment deactivated");
        Ok(record.status_view())
    }

    /// Counter view used to gate report generation.
    pub fn batch_readiness(
        &self,
        batch_id: &BatchId,
    ) -> Result<BatchReadinessView, AssessmentServiceError> {
        let batch = self.fetch_batch(batch_id)?;
        let records = self.repository.list_by_batch(batch_id)?;
        Ok(BatchProgress::from_records(&records).readiness_view(&batch))
    }

    /// Assembles the four report sections for the batch as they stand.
    pub fn batch_report(
        &self,
        batch_id: &BatchId,
    ) -> Result<BatchReport, AssessmentServiceError> {
        let batch = self.fetch_batch(batch_id)?;
        let records = self.repository.list_by_batch(batch_id)?;
        Ok(assemble_batch_report(
            &self.catalog,
            &batch,
            &records,
            self.issuer.clone(),
        ))
    }

    fn fetch_record(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.repository.fetch(assessment_id)?.ok_or_else(|| {
            ProgressError::from(NotFoundError::UnknownAssessment(assessment_id.0.clone())).into()
        })
    }

    fn fetch_batch(&self, batch_id: &BatchId) -> Result<Batch, AssessmentServiceError> {
        self.repository.fetch_batch(batch_id)?.ok_or_else(|| {
            ProgressError::from(NotFoundError::UnknownBatch(batch_id.0.clone())).into()
        })
    }
}

/// Error raised by the assessment service. The progression taxonomy stays
/// intact so the transport layer can map each kind distinctly.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
