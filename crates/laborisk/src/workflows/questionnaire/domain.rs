use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether higher raw scores for a dimension indicate better (positive)
/// or worse (negative) outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "fator de proteção",
            Self::Negative => "fator de risco",
        }
    }
}

/// Phrasing variant shown to a respondent based on their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespondentRole {
    Operational,
    Management,
}

impl RespondentRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Operational => "Operacional",
            Self::Management => "Gestão",
        }
    }

    /// Lenient parse used by roster ingestion; anything not recognizably
    /// managerial defaults to operational.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "gestao" | "gestão" | "gestor" | "gestora" | "lideranca" | "liderança"
            | "management" | "manager" => Self::Management,
            _ => Self::Operational,
        }
    }
}

/// Fixed 5-point answer scale. Values are stored and transported as the
/// numeric score (0/25/50/75/100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AnswerValue {
    Never,
    Rarely,
    Sometimes,
    Often,
    Always,
}

impl AnswerValue {
    pub const SCALE: [u8; 5] = [0, 25, 50, 75, 100];

    pub const fn points(self) -> u8 {
        match self {
            Self::Never => 0,
            Self::Rarely => 25,
            Self::Sometimes => 50,
            Self::Often => 75,
            Self::Always => 100,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Never => "Nunca",
            Self::Rarely => "Raramente",
            Self::Sometimes => "Às vezes",
            Self::Often => "Frequentemente",
            Self::Always => "Sempre",
        }
    }

    pub fn from_points(points: u8) -> Option<Self> {
        match points {
            0 => Some(Self::Never),
            25 => Some(Self::Rarely),
            50 => Some(Self::Sometimes),
            75 => Some(Self::Often),
            100 => Some(Self::Always),
            _ => None,
        }
    }
}

impl From<AnswerValue> for u8 {
    fn from(value: AnswerValue) -> Self {
        value.points()
    }
}

impl TryFrom<u8> for AnswerValue {
    type Error = OutOfScaleValue;

    fn try_from(points: u8) -> Result<Self, Self::Error> {
        Self::from_points(points).ok_or(OutOfScaleValue(points))
    }
}

/// Raised when a numeric answer is not one of the five scale values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfScaleValue(pub u8);

impl fmt::Display for OutOfScaleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not on the 0/25/50/75/100 answer scale", self.0)
    }
}

impl std::error::Error for OutOfScaleValue {}

/// Lifecycle of one employee's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    NotStarted,
    InProgress,
    Completed,
    Deactivated,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Deactivated => "deactivated",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Deactivated)
    }
}

/// Risk band a dimension score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// Fixed bucket order used everywhere a report enumerates categories.
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub const fn semaphore(self) -> Semaphore {
        match self {
            Self::Low => Semaphore::Green,
            Self::Medium => Semaphore::Yellow,
            Self::High => Semaphore::Red,
        }
    }

    pub const fn recommended_action(self) -> &'static str {
        match self {
            Self::Low => "maintain; monitor annually",
            Self::Medium => "attention; preventive intervention",
            Self::High => "immediate action; mitigation plan",
        }
    }
}

/// Traffic-light encoding of a risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semaphore {
    Green,
    Yellow,
    Red,
}

impl Semaphore {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_scale_round_trips_points() {
        for points in AnswerValue::SCALE {
            let value = AnswerValue::from_points(points).expect("scale value parses");
            assert_eq!(value.points(), points);
        }
        assert!(AnswerValue::from_points(60).is_none());
    }

    #[test]
    fn category_maps_to_fixed_semaphore() {
        assert_eq!(RiskCategory::Low.semaphore(), Semaphore::Green);
        assert_eq!(RiskCategory::Medium.semaphore(), Semaphore::Yellow);
        assert_eq!(RiskCategory::High.semaphore(), Semaphore::Red);
    }

    #[test]
    fn role_parse_defaults_to_operational() {
        assert_eq!(RespondentRole::parse("Gestão"), RespondentRole::Management);
        assert_eq!(RespondentRole::parse("manager"), RespondentRole::Management);
        assert_eq!(RespondentRole::parse("produção"), RespondentRole::Operational);
        assert_eq!(RespondentRole::parse(""), RespondentRole::Operational);
    }
}
