use serde::Serialize;

/// Mean and sample standard deviation of a value set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    pub const ZERO: Self = Self {
        mean: 0.0,
        std_dev: 0.0,
    };
}

/// Aggregates raw values into descriptive statistics. Degrades to zeros
/// rather than failing: an empty set yields mean 0 and a single value has
/// no spread. The standard deviation uses the sample denominator (n - 1).
pub fn aggregate(values: &[f64]) -> DescriptiveStats {
    if values.is_empty() {
        return DescriptiveStats::ZERO;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;

    if values.len() <= 1 {
        return DescriptiveStats { mean, std_dev: 0.0 };
    }

    let variance = values
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum::<f64>()
        / (count - 1.0);

    DescriptiveStats {
        mean,
        std_dev: variance.sqrt(),
    }
}
