use super::*;
use portal_core::{catalog::default_catalog, RetrievalError};
use shared::domain::{Coordinate, Region, VegetationMetric};

fn field() -> Region {
    Region::new(vec![
        Coordinate::new(28.61, 77.20).expect("coordinate"),
        Coordinate::new(28.62, 77.21).expect("coordinate"),
        Coordinate::new(28.60, 77.22).expect("coordinate"),
    ])
}

#[test]
fn formats_dates_like_locale_short_date() {
    let date = NaiveDate::from_ymd_opt(2024, 4, 5).expect("date");
    assert_eq!(format_date(date), "4/5/2024");
}

#[test]
fn selector_brackets_active_category() {
    let line = category_selector(CategoryFilter::Weather);
    assert!(line.contains("[Weather Updates]"));
    assert!(line.contains(" All Updates "));
    assert!(!line.contains("[All Updates]"));
}

#[test]
fn updates_render_filtered_cards() {
    let mut view = UpdatesView::new(default_catalog()).expect("view");
    view.select_category(CategoryFilter::Government);
    let text = render_updates(&view);

    assert!(text.contains("[Government] New Government Scheme for Farmers"));
    assert!(text.contains("4/15/2024 | Ministry of Agriculture"));
    assert!(!text.contains("Organic Farming"));
}

#[test]
fn updates_render_empty_state() {
    let view = UpdatesView::new(Vec::new()).expect("view");
    assert!(render_updates(&view).contains(EMPTY_STATE_MESSAGE));
}

#[test]
fn gauge_fills_proportionally() {
    let reading = portal_core::vegetation::reading(VegetationMetric::new(0.75).expect("metric"));
    assert_eq!(gauge(&reading), format!("[{}{}]", "#".repeat(15), ".".repeat(5)));

    let full = portal_core::vegetation::reading(VegetationMetric::new(1.0).expect("metric"));
    assert_eq!(gauge(&full), format!("[{}]", "#".repeat(20)));
}

#[test]
fn ndvi_render_covers_each_state() {
    let mut view = NdviView::new();
    assert!(render_ndvi(&view).contains("Select a region"));

    let ticket = view.select_region(field()).expect("ticket");
    assert!(render_ndvi(&view).contains("Analyzing region..."));

    view.resolve(
        ticket.generation,
        Ok(VegetationMetric::new(0.75).expect("metric")),
    );
    let text = render_ndvi(&view);
    assert!(text.contains("NDVI: 0.75"));
    assert!(text.contains("Status: Very Good (band 4, #91cf60)"));
    assert!(text.contains("*4 Very Good*"));

    let ticket = view.select_region(field()).expect("ticket");
    view.resolve(ticket.generation, Err(RetrievalError::Transport("down".into())));
    assert!(render_ndvi(&view).contains("Failed to fetch data, please try again"));
}
