use chrono::NaiveDateTime;
use serde::Serialize;

use super::super::assessments::domain::BatchId;
use super::super::domain::{Polarity, RiskCategory, Semaphore};

/// Header section: who was evaluated and how complete the batch is.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfileSection {
    pub company: String,
    pub total_subjects: usize,
    pub completed: usize,
    pub deactivated: usize,
    pub pending: usize,
    pub completion_pct: f64,
    pub released_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_submission: Option<NaiveDateTime>,
}

/// One row of the score table. Every dimension appears, answered or not;
/// rows without any respondent carry the insufficient-data marker instead
/// of a computed recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionScoreEntry {
    pub dimension: u8,
    pub label: &'static str,
    pub polarity: Polarity,
    pub polarity_label: &'static str,
    pub respondents: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub category: RiskCategory,
    pub category_label: &'static str,
    pub semaphore: Semaphore,
    pub semaphore_label: &'static str,
    pub action: &'static str,
    pub insufficient_data: bool,
}

/// One narrative bucket of the interpretation section. Buckets are always
/// emitted in low, medium, high order; empty buckets are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct InterpretationBlock {
    pub category: RiskCategory,
    pub heading: &'static str,
    pub narrative: String,
    pub dimensions: Vec<&'static str>,
}

/// Signature identity of the certifying professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuerSignature {
    pub name: String,
    pub registry: String,
}

/// Closing section: free-text observations plus the fixed disclaimer and
/// signature block.
#[derive(Debug, Clone, Serialize)]
pub struct ConclusionSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub disclaimer: &'static str,
    pub issuer: IssuerSignature,
}

/// The four assembled report sections, as consumed by rendering.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: BatchId,
    pub profile: CompanyProfileSection,
    pub scores: Vec<DimensionScoreEntry>,
    pub interpretation: Vec<InterpretationBlock>,
    pub conclusion: ConclusionSection,
}
