//! NDVI value classification into status bands.

use shared::{
    domain::{ColorBand, MetricReading, VegetationMetric, VegetationStatus},
    error::DomainError,
};

/// Exclusive upper bound of each band below `Excellent`.
const STATUS_UPPER_BOUNDS: [(f64, VegetationStatus); 4] = [
    (0.2, VegetationStatus::Poor),
    (0.4, VegetationStatus::Fair),
    (0.6, VegetationStatus::Good),
    (0.8, VegetationStatus::VeryGood),
];

pub fn classify(metric: VegetationMetric) -> VegetationStatus {
    let value = metric.value();
    STATUS_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, status)| *status)
        .unwrap_or(VegetationStatus::Excellent)
}

pub fn color_band(metric: VegetationMetric) -> ColorBand {
    ColorBand::from(classify(metric))
}

/// Classifies a raw value, failing fast when it lies outside `[0, 1]`.
pub fn classify_value(value: f64) -> Result<VegetationStatus, DomainError> {
    VegetationMetric::new(value).map(classify)
}

pub fn reading(metric: VegetationMetric) -> MetricReading {
    let status = classify(metric);
    MetricReading {
        metric,
        status,
        band: ColorBand::from(status),
    }
}

#[cfg(test)]
#[path = "tests/vegetation_tests.rs"]
mod tests;
