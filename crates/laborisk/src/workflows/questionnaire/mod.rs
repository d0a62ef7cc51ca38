pub mod assessments;
pub mod batch;
mod catalog;
pub mod domain;
pub mod report;
pub mod scoring;

pub use batch::{Batch, BatchProgress, BatchReadinessView};
pub use catalog::{
    DimensionTemplate, DimensionView, ItemTemplate, ItemView, QuestionnaireCatalog,
    QuestionnaireView,
};
