//! Per-employee assessment progression: response storage, the resume/no-
//! regression state machine, and the service/repository/router seams the
//! outer layers plug into.

pub mod domain;
pub mod progress;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Assessment, AssessmentId, BackNavigation, BatchId, DimensionSubmission, ItemAnswer,
    ResponseSet, SaveOutcome, Subject,
};
pub use progress::{NotFoundError, ProgressError, SequenceViolation, ValidationError};
pub use repository::{
    AssessmentRecord, AssessmentRepository, AssessmentStatusView, RepositoryError,
};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
