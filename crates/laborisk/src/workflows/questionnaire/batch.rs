use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::assessments::domain::BatchId;
use super::assessments::repository::AssessmentRecord;
use super::domain::AssessmentStatus;

/// One release event grouping the assessments of a single employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub company: String,
    pub released_at: NaiveDateTime,
}

/// Completion counters derived from a batch's assessments. Always
/// recomputed from the records, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub total: usize,
    pub completed: usize,
    pub deactivated: usize,
}

impl BatchProgress {
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        let mut progress = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.assessment.status {
                AssessmentStatus::Completed => progress.completed += 1,
                AssessmentStatus::Deactivated => progress.deactivated += 1,
                AssessmentStatus::NotStarted | AssessmentStatus::InProgress => {}
            }
        }

        progress
    }

    pub fn pending(&self) -> usize {
        self.total
            .saturating_sub(self.completed)
            .saturating_sub(self.deactivated)
    }

    /// A batch is report-ready once every non-deactivated subject has
    /// submitted: completed == total - deactivated.
    pub fn ready(&self) -> bool {
        self.completed == self.total.saturating_sub(self.deactivated)
    }

    /// Share of active (non-deactivated) subjects that completed, 0-100.
    pub fn completion_pct(&self) -> f64 {
        let active = self.total.saturating_sub(self.deactivated);
        if active == 0 {
            return 0.0;
        }
        self.completed as f64 / active as f64 * 100.0
    }

    pub fn readiness_view(&self, batch: &Batch) -> BatchReadinessView {
        BatchReadinessView {
            batch_id: batch.id.clone(),
            company: batch.company.clone(),
            ready: self.ready(),
            total: self.total,
            completed: self.completed,
            deactivated: self.deactivated,
            pending: self.pending(),
        }
    }
}

/// Readiness payload gating the report-generation UI in the outer layer.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReadinessView {
    pub batch_id: BatchId,
    pub company: String,
    pub ready: bool,
    pub total: usize,
    pub completed: usize,
    pub deactivated: usize,
    pub pending: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(total: usize, completed: usize, deactivated: usize) -> BatchProgress {
        BatchProgress {
            total,
            completed,
            deactivated,
        }
    }

    #[test]
    fn batch_with_pending_subjects_is_not_ready() {
        let progress = progress(10, 7, 1);
        assert!(!progress.ready());
        assert_eq!(progress.pending(), 2);
    }

    #[test]
    fn batch_is_ready_once_every_active_subject_completed() {
        let progress = progress(10, 9, 1);
        assert!(progress.ready());
        assert_eq!(progress.pending(), 0);
    }

    #[test]
    fn completion_pct_ignores_deactivated_subjects() {
        let progress = progress(10, 6, 2);
        assert!((progress.completion_pct() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_reports_zero_completion() {
        let progress = progress(0, 0, 0);
        assert_eq!(progress.completion_pct(), 0.0);
        assert!(progress.ready());
    }
}
