pub mod questionnaire;
pub mod roster;
