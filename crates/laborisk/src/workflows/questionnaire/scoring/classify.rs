use super::super::domain::{Polarity, RiskCategory, Semaphore};
use serde::Serialize;

/// Lower bound of the medium tercile on the 0-100 scale, inclusive.
pub const MEDIUM_BAND_FLOOR: f64 = 33.0;
/// Upper bound of the medium tercile on the 0-100 scale, inclusive.
pub const MEDIUM_BAND_CEILING: f64 = 66.0;

/// Classification of one dimension mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskRating {
    pub category: RiskCategory,
    pub semaphore: Semaphore,
    pub action: &'static str,
}

impl RiskRating {
    pub const fn for_category(category: RiskCategory) -> Self {
        Self {
            category,
            semaphore: category.semaphore(),
            action: category.recommended_action(),
        }
    }
}

/// The single canonical mean-to-category mapping. Bands are fixed terciles
/// of the 0-100 scale, never sample-derived percentiles; exactly 33 and
/// exactly 66 belong to the medium band for both polarities.
pub fn classify(mean: f64, polarity: Polarity) -> RiskRating {
    let category = if (MEDIUM_BAND_FLOOR..=MEDIUM_BAND_CEILING).contains(&mean) {
        RiskCategory::Medium
    } else {
        let favorable = match polarity {
            Polarity::Positive => mean > MEDIUM_BAND_CEILING,
            Polarity::Negative => mean < MEDIUM_BAND_FLOOR,
        };
        if favorable {
            RiskCategory::Low
        } else {
            RiskCategory::High
        }
    };

    RiskRating::for_category(category)
}
