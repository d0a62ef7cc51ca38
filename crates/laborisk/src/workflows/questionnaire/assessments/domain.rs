use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::super::catalog::DimensionTemplate;
use super::super::domain::{AnswerValue, AssessmentStatus, RespondentRole};

/// Identifier wrapper for released assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Identifier wrapper for release batches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub String);

/// The employee a released assessment belongs to. Captured at release
/// time from the employer roster; no protected-class data is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub employee_id: String,
    pub name: String,
    pub role: RespondentRole,
    pub sector: Option<String>,
}

/// One employee's evaluation for one release event. `current_dimension`
/// ranges 1..=N+1; it only moves forward through dimension saves and only
/// moves backward through back-navigation. `resume_anchor` is the floor
/// below which neither navigation nor saves may reach once a subject
/// returns to an incomplete evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub batch_id: BatchId,
    pub subject: Subject,
    pub status: AssessmentStatus,
    pub current_dimension: u8,
    pub resume_anchor: Option<u8>,
    pub created_at: NaiveDateTime,
    pub submitted_at: Option<NaiveDateTime>,
}

impl Assessment {
    pub fn released(
        id: AssessmentId,
        batch_id: BatchId,
        subject: Subject,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            batch_id,
            subject,
            status: AssessmentStatus::NotStarted,
            current_dimension: 1,
            resume_anchor: None,
            created_at,
            submitted_at: None,
        }
    }
}

/// Latest-value store for a single assessment, keyed by item key. Writes
/// happen only in whole-dimension batches; the last write per item wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn value(&self, item_key: &str) -> Option<AnswerValue> {
        self.answers.get(item_key).copied()
    }

    /// Replaces every answer of one dimension in a single batch write.
    pub fn record_dimension(&mut self, entries: Vec<(String, AnswerValue)>) {
        for (item_key, value) in entries {
            self.answers.insert(item_key, value);
        }
    }

    /// Raw scores for the answered items of one dimension, in catalog
    /// order. Unanswered items are skipped rather than defaulted.
    pub fn dimension_values(&self, dimension: &DimensionTemplate) -> Vec<f64> {
        dimension
            .items
            .iter()
            .filter_map(|item| self.value(item.key))
            .map(|value| f64::from(value.points()))
            .collect()
    }

    /// A dimension counts as answered only when every one of its items
    /// has a recorded response.
    pub fn covers_dimension(&self, dimension: &DimensionTemplate) -> bool {
        dimension
            .items
            .iter()
            .all(|item| self.answers.contains_key(item.key))
    }
}

/// Whole-dimension submission payload received from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionSubmission {
    pub dimension: u8,
    pub items: Vec<ItemAnswer>,
}

/// A single item answer as transported on the wire. The value is kept raw
/// here so scale membership is checked by the save path, not by serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAnswer {
    pub item: String,
    pub value: u8,
}

/// Result of a successful dimension save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SaveOutcome {
    Advanced { next_dimension: u8 },
    Completed,
}

/// Result of a back-navigation request. `Refused` is a deliberate no-op,
/// not an error: the subject stays where they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "navigation")]
pub enum BackNavigation {
    MovedTo { dimension: u8 },
    Home,
    Refused,
}
