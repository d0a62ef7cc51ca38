//! Employer roster ingestion. A release event starts from a CSV export of
//! the employee roster; this module turns it into the subjects handed to
//! the assessment service. Anything beyond basic field checks is left to
//! the uploading layer.

use crate::workflows::questionnaire::assessments::Subject;
use crate::workflows::questionnaire::domain::RespondentRole;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    EmptyRoster,
    MissingField { row: usize, field: &'static str },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::EmptyRoster => {
                write!(f, "roster contains no employees to release")
            }
            RosterImportError::MissingField { row, field } => {
                write!(f, "roster row {} is missing the {} field", row, field)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::EmptyRoster | RosterImportError::MissingField { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Subject>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Subject>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut subjects = Vec::new();
        for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = record?;
            // Header rows start the count at one for error messages.
            let row_number = index + 2;

            let employee_id = row.employee_id.ok_or(RosterImportError::MissingField {
                row: row_number,
                field: "Employee ID",
            })?;
            let name = row.name.ok_or(RosterImportError::MissingField {
                row: row_number,
                field: "Name",
            })?;

            let role = row
                .role
                .as_deref()
                .map(RespondentRole::parse)
                .unwrap_or(RespondentRole::Operational);

            subjects.push(Subject {
                employee_id,
                name,
                role,
                sector: row.sector,
            });
        }

        if subjects.is_empty() {
            return Err(RosterImportError::EmptyRoster);
        }

        Ok(subjects)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(
        rename = "Employee ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    employee_id: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Role", default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(rename = "Sector", default, deserialize_with = "empty_string_as_none")]
    sector: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
