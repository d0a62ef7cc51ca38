use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::super::catalog::QuestionnaireCatalog;
use super::super::domain::{AnswerValue, AssessmentStatus};
use super::domain::{BackNavigation, DimensionSubmission, SaveOutcome};
use super::repository::AssessmentRecord;

/// Recoverable input problems in a dimension submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("dimension {submitted} is not the current dimension ({current})")]
    NotCurrentDimension { submitted: u8, current: u8 },
    #[error("item {item} of dimension {dimension} is unanswered")]
    MissingItem { dimension: u8, item: String },
    #[error("item {item} of dimension {dimension} was answered more than once")]
    DuplicateItem { dimension: u8, item: String },
    #[error("item {item} does not belong to dimension {dimension}")]
    UnknownItem { dimension: u8, item: String },
    #[error("value {value} for item {item} is outside the 0/25/50/75/100 scale")]
    OutOfScale { item: String, value: u8 },
}

/// Attempts to move the progression somewhere the state machine forbids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceViolation {
    #[error("cannot save dimension {submitted} while dimension {current} is still pending")]
    AheadOfCurrent { submitted: u8, current: u8 },
    #[error("dimension {submitted} is below the resume anchor {anchor}")]
    BelowResumeAnchor { submitted: u8, anchor: u8 },
    #[error("assessment was already started")]
    AlreadyStarted,
    #[error("assessment is already completed")]
    AlreadyCompleted,
    #[error("assessment was deactivated")]
    Deactivated,
}

/// References to entities the questionnaire model does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("dimension {0} does not exist in the questionnaire")]
    UnknownDimension(u8),
    #[error("assessment {0} does not exist")]
    UnknownAssessment(String),
    #[error("batch {0} does not exist")]
    UnknownBatch(String),
}

/// The three error kinds the progression distinguishes. They are never
/// collapsed; the transport layer maps each to its own status code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Sequence(#[from] SequenceViolation),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl AssessmentRecord {
    /// Opens a released assessment for answering. Released records wait in
    /// `NotStarted` until the subject actually opens the questionnaire.
    pub fn begin(&mut self) -> Result<(), SequenceViolation> {
        match self.assessment.status {
            AssessmentStatus::NotStarted => {
                self.assessment.status = AssessmentStatus::InProgress;
                Ok(())
            }
            AssessmentStatus::InProgress => Err(SequenceViolation::AlreadyStarted),
            AssessmentStatus::Completed => Err(SequenceViolation::AlreadyCompleted),
            AssessmentStatus::Deactivated => Err(SequenceViolation::Deactivated),
        }
    }

    /// Persists one whole dimension of answers and advances the pointer.
    /// The submission must target the current dimension and cover every
    /// one of its items exactly once with an in-scale value. Saving the
    /// final dimension completes the assessment and clears the anchor.
    pub fn save_dimension(
        &mut self,
        catalog: &QuestionnaireCatalog,
        submission: &DimensionSubmission,
        now: NaiveDateTime,
    ) -> Result<SaveOutcome, ProgressError> {
        match self.assessment.status {
            AssessmentStatus::Completed => {
                return Err(SequenceViolation::AlreadyCompleted.into());
            }
            AssessmentStatus::Deactivated => {
                return Err(SequenceViolation::Deactivated.into());
            }
            AssessmentStatus::NotStarted | AssessmentStatus::InProgress => {}
        }

        let submitted = submission.dimension;
        let dimension = catalog
            .dimension(submitted)
            .ok_or(NotFoundError::UnknownDimension(submitted))?;

        if let Some(anchor) = self.assessment.resume_anchor {
            if submitted < anchor {
                return Err(SequenceViolation::BelowResumeAnchor { submitted, anchor }.into());
            }
        }

        let current = self.assessment.current_dimension;
        if submitted > current {
            return Err(SequenceViolation::AheadOfCurrent { submitted, current }.into());
        }
        if submitted < current {
            return Err(ValidationError::NotCurrentDimension { submitted, current }.into());
        }

        let mut entries: BTreeMap<&str, AnswerValue> = BTreeMap::new();
        for answer in &submission.items {
            let item = dimension
                .item(&answer.item)
                .ok_or_else(|| ValidationError::UnknownItem {
                    dimension: submitted,
                    item: answer.item.clone(),
                })?;

            let value =
                AnswerValue::from_points(answer.value).ok_or_else(|| ValidationError::OutOfScale {
                    item: answer.item.clone(),
                    value: answer.value,
                })?;

            if entries.insert(item.key, value).is_some() {
                return Err(ValidationError::DuplicateItem {
                    dimension: submitted,
                    item: answer.item.clone(),
                }
                .into());
            }
        }

        // Name the first unanswered item so the client can focus it.
        for item in &dimension.items {
            if !entries.contains_key(item.key) {
                return Err(ValidationError::MissingItem {
                    dimension: submitted,
                    item: item.key.to_string(),
                }
                .into());
            }
        }

        self.responses.record_dimension(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        );

        self.assessment.status = AssessmentStatus::InProgress;
        self.assessment.current_dimension = submitted + 1;

        if submitted == catalog.final_dimension() {
            self.assessment.status = AssessmentStatus::Completed;
            self.assessment.submitted_at = Some(now);
            self.assessment.resume_anchor = None;
            Ok(SaveOutcome::Completed)
        } else {
            Ok(SaveOutcome::Advanced {
                next_dimension: self.assessment.current_dimension,
            })
        }
    }

    /// Resume detection, run whenever an incomplete assessment is
    /// (re)opened. The first reopen that finds the subject past dimension
    /// one records the anchor; it stays fixed until completion clears it.
    pub fn reopen(&mut self) -> Option<u8> {
        if !self.assessment.status.is_terminal()
            && self.assessment.current_dimension > 1
            && self.assessment.resume_anchor.is_none()
        {
            self.assessment.resume_anchor = Some(self.assessment.current_dimension);
        }
        self.assessment.resume_anchor
    }

    /// Steps the pointer back one dimension. Below dimension one the
    /// subject is routed home; below the resume anchor the request is
    /// silently refused with no state change. Never an error.
    pub fn navigate_back(&mut self) -> BackNavigation {
        if self.assessment.status.is_terminal() {
            return BackNavigation::Refused;
        }

        let target = self.assessment.current_dimension.saturating_sub(1);
        if target < 1 {
            return BackNavigation::Home;
        }

        if let Some(anchor) = self.assessment.resume_anchor {
            if target < anchor {
                return BackNavigation::Refused;
            }
        }

        self.assessment.current_dimension = target;
        BackNavigation::MovedTo { dimension: target }
    }

    /// Administrative removal of a subject from the batch. Terminal.
    pub fn deactivate(&mut self) -> Result<(), SequenceViolation> {
        match self.assessment.status {
            AssessmentStatus::Completed => Err(SequenceViolation::AlreadyCompleted),
            AssessmentStatus::Deactivated => Err(SequenceViolation::Deactivated),
            AssessmentStatus::NotStarted | AssessmentStatus::InProgress => {
                self.assessment.status = AssessmentStatus::Deactivated;
                Ok(())
            }
        }
    }
}
