use super::*;

fn metric(value: f64) -> VegetationMetric {
    VegetationMetric::new(value).expect("metric in range")
}

#[test]
fn values_below_point_two_are_poor() {
    for value in [0.0, 0.05, 0.1, 0.19, 0.199_999] {
        assert_eq!(classify(metric(value)), VegetationStatus::Poor, "{value}");
    }
}

#[test]
fn lower_bounds_are_inclusive() {
    assert_eq!(classify(metric(0.2)), VegetationStatus::Fair);
    assert_eq!(classify(metric(0.4)), VegetationStatus::Good);
    assert_eq!(classify(metric(0.6)), VegetationStatus::VeryGood);
    assert_eq!(classify(metric(0.8)), VegetationStatus::Excellent);
}

#[test]
fn final_band_is_closed_at_one() {
    assert_eq!(classify(metric(1.0)), VegetationStatus::Excellent);
    assert_eq!(color_band(metric(1.0)), ColorBand::DarkGreen);
}

#[test]
fn color_band_uses_same_thresholds_as_status() {
    let cases = [
        (0.1, 1),
        (0.2, 2),
        (0.39, 2),
        (0.5, 3),
        (0.75, 4),
        (0.8, 5),
    ];
    for (value, band) in cases {
        assert_eq!(color_band(metric(value)).id(), band, "{value}");
    }
}

#[test]
fn reading_bundles_status_and_band() {
    let reading = reading(metric(0.75));
    assert_eq!(reading.status, VegetationStatus::VeryGood);
    assert_eq!(reading.status.label(), "Very Good");
    assert_eq!(reading.band.id(), 4);
}

#[test]
fn out_of_range_values_fail_fast() {
    assert_eq!(classify_value(-0.01), Err(DomainError::InvalidMetric(-0.01)));
    assert_eq!(classify_value(1.01), Err(DomainError::InvalidMetric(1.01)));
    assert_eq!(classify_value(0.3), Ok(VegetationStatus::Fair));
}
