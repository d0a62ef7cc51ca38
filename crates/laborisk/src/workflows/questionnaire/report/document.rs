use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use super::super::assessments::domain::BatchId;
use super::views::BatchReport;

/// Document lifecycle of an assembled report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Issued,
    Sent,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Sent => "sent",
        }
    }
}

/// A signable report document wrapping the assembled sections. Issuer
/// observations stay editable only while the document is a draft; every
/// transition stamps its timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub batch_id: BatchId,
    pub status: ReportStatus,
    pub sections: BatchReport,
    pub drafted_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<NaiveDateTime>,
}

impl ReportDocument {
    pub fn draft(sections: BatchReport, now: NaiveDateTime) -> Self {
        Self {
            batch_id: sections.batch_id.clone(),
            status: ReportStatus::Draft,
            sections,
            drafted_at: now,
            issued_at: None,
            sent_at: None,
        }
    }

    pub fn set_observations(&mut self, text: impl Into<String>) -> Result<(), ReportError> {
        if self.status != ReportStatus::Draft {
            return Err(ReportError::ObservationsLocked {
                status: self.status,
            });
        }
        self.sections.conclusion.observations = Some(text.into());
        Ok(())
    }

    pub fn issue(&mut self, now: NaiveDateTime) -> Result<(), ReportError> {
        if self.status != ReportStatus::Draft {
            return Err(ReportError::InvalidTransition {
                from: self.status,
                to: ReportStatus::Issued,
            });
        }
        self.status = ReportStatus::Issued;
        self.issued_at = Some(now);
        Ok(())
    }

    pub fn mark_sent(&mut self, now: NaiveDateTime) -> Result<(), ReportError> {
        if self.status != ReportStatus::Issued {
            return Err(ReportError::InvalidTransition {
                from: self.status,
                to: ReportStatus::Sent,
            });
        }
        self.status = ReportStatus::Sent;
        self.sent_at = Some(now);
        Ok(())
    }
}

#[derive(Debug)]
pub enum ReportError {
    ObservationsLocked { status: ReportStatus },
    InvalidTransition { from: ReportStatus, to: ReportStatus },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::ObservationsLocked { status } => {
                write!(
                    f,
                    "observations can only be edited in draft (document is {})",
                    status.label()
                )
            }
            ReportError::InvalidTransition { from, to } => {
                write!(
                    f,
                    "cannot move report from {} to {}",
                    from.label(),
                    to.label()
                )
            }
        }
    }
}

impl std::error::Error for ReportError {}

#[cfg(test)]
mod tests {
    use super::super::super::batch::Batch;
    use super::super::super::QuestionnaireCatalog;
    use super::super::views::IssuerSignature;
    use super::super::{assemble_batch_report, ReportDocument, ReportStatus};
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 10)
            .expect("valid date")
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
    }

    fn draft_document() -> ReportDocument {
        let catalog = QuestionnaireCatalog::standard();
        let batch = Batch {
            id: BatchId("batch-0007".to_string()),
            company: "Transportes Pontual".to_string(),
            released_at: at(8),
        };
        let sections = assemble_batch_report(
            &catalog,
            &batch,
            &[],
            IssuerSignature {
                name: "Dr. Otávio Lima".to_string(),
                registry: "CRM 13/9876".to_string(),
            },
        );
        ReportDocument::draft(sections, at(9))
    }

    #[test]
    fn lifecycle_stamps_each_transition() {
        let mut document = draft_document();
        assert_eq!(document.status, ReportStatus::Draft);

        document.issue(at(10)).expect("draft issues");
        assert_eq!(document.status, ReportStatus::Issued);
        assert_eq!(document.issued_at, Some(at(10)));

        document.mark_sent(at(11)).expect("issued sends");
        assert_eq!(document.status, ReportStatus::Sent);
        assert_eq!(document.sent_at, Some(at(11)));
    }

    #[test]
    fn observations_lock_after_issuing() {
        let mut document = draft_document();
        document
            .set_observations("Recomenda-se pesquisa de clima no setor de expedição.")
            .expect("draft accepts observations");

        document.issue(at(10)).expect("draft issues");
        let error = document
            .set_observations("tarde demais")
            .expect_err("issued document refuses edits");
        assert!(matches!(
            error,
            ReportError::ObservationsLocked {
                status: ReportStatus::Issued
            }
        ));
    }

    #[test]
    fn sending_requires_an_issued_document() {
        let mut document = draft_document();
        let error = document.mark_sent(at(10)).expect_err("draft cannot be sent");
        assert!(matches!(
            error,
            ReportError::InvalidTransition {
                from: ReportStatus::Draft,
                to: ReportStatus::Sent
            }
        ));

        document.issue(at(10)).expect("draft issues");
        let error = document.issue(at(11)).expect_err("cannot issue twice");
        assert!(matches!(
            error,
            ReportError::InvalidTransition {
                from: ReportStatus::Issued,
                to: ReportStatus::Issued
            }
        ));
    }
}
