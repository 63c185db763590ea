use super::*;
use crate::{
    error::{ApiError, ErrorCode},
    protocol::{NdviPhase, NdviSnapshot, ViewSnapshot},
};

#[test]
fn category_filter_parses_case_insensitively() {
    assert_eq!("Research".parse::<CategoryFilter>(), Ok(CategoryFilter::Research));
    assert_eq!(" all ".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
    assert_eq!(
        "livestock".parse::<CategoryFilter>(),
        Err(DomainError::UnknownCategory("livestock".to_string()))
    );
}

#[test]
fn all_filter_matches_every_category() {
    for category in NewsCategory::ALL {
        assert!(CategoryFilter::All.matches(category));
        assert!(CategoryFilter::from(category).matches(category));
    }
    assert!(!CategoryFilter::Weather.matches(NewsCategory::Government));
}

#[test]
fn filter_labels_follow_selector_buttons() {
    let labels: Vec<_> = CategoryFilter::OPTIONS.iter().map(|f| f.label()).collect();
    assert_eq!(
        labels,
        vec![
            "All Updates",
            "Government Schemes",
            "Research & Innovation",
            "Weather Updates"
        ]
    );
}

#[test]
fn region_parses_semicolon_separated_pairs() {
    let region: Region = "28.61, 77.20; 28.70,77.10;".parse().expect("region");
    assert_eq!(region.len(), 2);
    assert_eq!(region.points()[1], Coordinate { lat: 28.70, lng: 77.10 });
}

#[test]
fn blank_region_is_empty_selection() {
    let region: Region = "  ".parse().expect("region");
    assert!(region.is_empty());
}

#[test]
fn region_rejects_out_of_range_coordinates() {
    let err = "91.0,10.0".parse::<Region>().expect_err("latitude out of range");
    assert_eq!(err, DomainError::InvalidCoordinate { lat: 91.0, lng: 10.0 });

    let err = "12.0".parse::<Region>().expect_err("missing longitude");
    assert!(matches!(err, DomainError::InvalidRegion(_)));
}

#[test]
fn vegetation_metric_enforces_unit_interval() {
    assert!(VegetationMetric::new(0.0).is_ok());
    assert!(VegetationMetric::new(1.0).is_ok());
    assert_eq!(
        VegetationMetric::new(1.2),
        Err(DomainError::InvalidMetric(1.2))
    );
    assert!(VegetationMetric::new(f64::NAN).is_err());
    assert_eq!(VegetationMetric::clamped(-0.5).value(), 0.0);
    assert_eq!(VegetationMetric::clamped(f64::NAN).value(), 0.0);
}

#[test]
fn vegetation_metric_deserialization_validates_range() {
    let ok: VegetationMetric = serde_json::from_str("0.42").expect("in range");
    assert_eq!(ok.value(), 0.42);
    assert!(serde_json::from_str::<VegetationMetric>("1.5").is_err());
}

#[test]
fn color_bands_are_numbered_one_through_five() {
    let ids: Vec<u8> = [
        VegetationStatus::Poor,
        VegetationStatus::Fair,
        VegetationStatus::Good,
        VegetationStatus::VeryGood,
        VegetationStatus::Excellent,
    ]
    .into_iter()
    .map(|status| ColorBand::from(status).id())
    .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn domain_errors_map_to_api_codes() {
    let api: ApiError = DomainError::InvalidMetric(2.0).into();
    assert_eq!(api.code, ErrorCode::InvalidMetric);
    let api: ApiError = DomainError::DuplicateItemId(3).into();
    assert_eq!(api.code, ErrorCode::Validation);
    assert_eq!(api.message, "duplicate news item id 3");
}

#[test]
fn snapshot_serializes_with_type_tag() {
    let snapshot = ViewSnapshot::Ndvi(NdviSnapshot {
        phase: NdviPhase::Idle,
        generation: 0,
        region: Region::empty(),
        reading: None,
        error: None,
    });
    let json = serde_json::to_value(&snapshot).expect("json");
    assert_eq!(json["type"], "ndvi");
    assert_eq!(json["payload"]["phase"], "idle");
    assert!(json["payload"].get("reading").is_none());
}
