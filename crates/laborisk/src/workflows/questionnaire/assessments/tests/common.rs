use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::workflows::questionnaire::assessments::domain::{
    Assessment, AssessmentId, BatchId, DimensionSubmission, ItemAnswer, ResponseSet, Subject,
};
use crate::workflows::questionnaire::assessments::repository::{
    AssessmentRecord, AssessmentRepository, RepositoryError,
};
use crate::workflows::questionnaire::assessments::service::AssessmentService;
use crate::workflows::questionnaire::batch::Batch;
use crate::workflows::questionnaire::domain::RespondentRole;
use crate::workflows::questionnaire::report::views::IssuerSignature;
use crate::workflows::questionnaire::QuestionnaireCatalog;

pub(super) fn noon(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, day)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

pub(super) fn subject(suffix: &str, role: RespondentRole) -> Subject {
    Subject {
        employee_id: format!("emp-{suffix}"),
        name: format!("Colaborador {suffix}"),
        role,
        sector: Some("Produção".to_string()),
    }
}

pub(super) fn issuer() -> IssuerSignature {
    IssuerSignature {
        name: "Dra. Helena Prado".to_string(),
        registry: "CRP 06/12345".to_string(),
    }
}

/// A complete in-scale submission for one dimension, every item answered
/// with the same points value.
pub(super) fn full_submission(
    catalog: &QuestionnaireCatalog,
    dimension: u8,
    points: u8,
) -> DimensionSubmission {
    let template = catalog.dimension(dimension).expect("dimension exists");
    DimensionSubmission {
        dimension,
        items: template
            .items
            .iter()
            .map(|item| ItemAnswer {
                item: item.key.to_string(),
                value: points,
            })
            .collect(),
    }
}

/// A standalone released record for state-machine tests that do not need
/// the repository.
pub(super) fn released_record(suffix: &str) -> AssessmentRecord {
    AssessmentRecord {
        assessment: Assessment::released(
            AssessmentId(format!("assess-{suffix}")),
            BatchId("batch-test".to_string()),
            subject(suffix, RespondentRole::Operational),
            noon(1),
        ),
        responses: ResponseSet::new(),
    }
}

/// Advances a record through dimensions 1..=through with uniform answers.
pub(super) fn advance_record(
    record: &mut AssessmentRecord,
    catalog: &QuestionnaireCatalog,
    through: u8,
    points: u8,
) {
    for dimension in 1..=through {
        record
            .save_dimension(catalog, &full_submission(catalog, dimension, points), noon(2))
            .expect("dimension saves");
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    batches: Arc<Mutex<HashMap<BatchId, Batch>>>,
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn insert_batch(&self, batch: Batch) -> Result<(), RepositoryError> {
        let mut guard = self.batches.lock().expect("batch mutex poisoned");
        if guard.contains_key(&batch.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(batch.id.clone(), batch);
        Ok(())
    }

    fn fetch_batch(&self, id: &BatchId) -> Result<Option<Batch>, RepositoryError> {
        let guard = self.batches.lock().expect("batch mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment.id) {
            guard.insert(record.assessment.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_by_batch(&self, batch_id: &BatchId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<AssessmentRecord> = guard
            .values()
            .filter(|record| &record.assessment.batch_id == batch_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.assessment.id.0.cmp(&b.assessment.id.0));
        Ok(records)
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert_batch(&self, _batch: Batch) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_batch(&self, _id: &BatchId) -> Result<Option<Batch>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: AssessmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_batch(
        &self,
        _batch_id: &BatchId,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(repository.clone(), issuer());
    (service, repository)
}

/// Releases one batch with the given subjects and returns the ids in the
/// repository's listing order.
pub(super) fn release_subjects(
    service: &AssessmentService<MemoryRepository>,
    repository: &MemoryRepository,
    count: usize,
) -> (Batch, Vec<AssessmentId>) {
    let subjects = (0..count)
        .map(|index| subject(&format!("{index:02}"), RespondentRole::Operational))
        .collect();
    let batch = service
        .release_batch("Metalúrgica Aurora", subjects, noon(1))
        .expect("batch releases");
    let ids = repository
        .list_by_batch(&batch.id)
        .expect("listing succeeds")
        .into_iter()
        .map(|record| record.assessment.id)
        .collect();
    (batch, ids)
}

/// Walks one assessment through all ten dimensions with uniform answers.
pub(super) fn complete_assessment(
    service: &AssessmentService<MemoryRepository>,
    id: &AssessmentId,
    points: u8,
) {
    let final_dimension = QuestionnaireCatalog::DIMENSION_COUNT;
    for dimension in 1..=final_dimension {
        let submission = full_submission(service.catalog(), dimension, points);
        service
            .save_dimension(id, &submission, noon(3))
            .expect("dimension saves");
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
