mod assembler;
mod document;
pub mod views;

pub use assembler::{
    assemble_batch_report, assemble_subject_report, INSUFFICIENT_DATA_ACTION, REPORT_DISCLAIMER,
};
pub use document::{ReportDocument, ReportError, ReportStatus};
