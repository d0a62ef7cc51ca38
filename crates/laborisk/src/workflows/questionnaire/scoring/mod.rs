mod aggregate;
mod classify;

pub use aggregate::{aggregate, DescriptiveStats};
pub use classify::{classify, RiskRating, MEDIUM_BAND_CEILING, MEDIUM_BAND_FLOOR};
