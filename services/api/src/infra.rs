use chrono::{NaiveDate, NaiveDateTime};
use laborisk::workflows::questionnaire::assessments::{
    AssessmentId, AssessmentRecord, AssessmentRepository, BatchId, RepositoryError,
};
use laborisk::workflows::questionnaire::Batch;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    batches: Arc<Mutex<HashMap<BatchId, Batch>>>,
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
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

/// Built-in roster used by the demo and by `batch report` when no CSV is
/// supplied.
pub(crate) const SAMPLE_ROSTER_CSV: &str = "\
Employee ID,Name,Role,Sector
E-001,Ana Souza,Operacional,Expedição
E-002,Bruno Leite,Gestão,Expedição
E-003,Carla Nunes,Operacional,Produção
E-004,Davi Martins,Operacional,Produção
E-005,Elisa Prado,Gestão,Administrativo
";

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).expect("midnight exists")
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
