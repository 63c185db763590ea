use super::*;
use chrono::NaiveDate;
use shared::domain::{NewsCategory, NewsItemId};

fn news(id: i64, category: NewsCategory) -> NewsItem {
    NewsItem {
        id: NewsItemId(id),
        title: format!("item {id}"),
        description: String::new(),
        date: NaiveDate::from_ymd_opt(2024, 4, 1).expect("date"),
        author: "desk".to_string(),
        category,
    }
}

fn mixed_items() -> Vec<NewsItem> {
    vec![
        news(1, NewsCategory::Government),
        news(2, NewsCategory::Research),
        news(3, NewsCategory::Weather),
        news(4, NewsCategory::Research),
        news(5, NewsCategory::Government),
    ]
}

fn ids(items: &[&NewsItem]) -> Vec<i64> {
    items.iter().map(|item| item.id.0).collect()
}

#[test]
fn all_returns_every_item_in_order() {
    let items = mixed_items();
    assert_eq!(ids(&filter_items(&items, CategoryFilter::All)), vec![1, 2, 3, 4, 5]);
}

#[test]
fn category_returns_ordered_subsequence() {
    let items = mixed_items();
    assert_eq!(ids(&filter_items(&items, CategoryFilter::Research)), vec![2, 4]);
    assert_eq!(ids(&filter_items(&items, CategoryFilter::Government)), vec![1, 5]);
    assert_eq!(ids(&filter_items(&items, CategoryFilter::Weather)), vec![3]);
}

#[test]
fn filter_keeps_exactly_the_matching_items() {
    let items = mixed_items();
    for filter in CategoryFilter::OPTIONS {
        let kept = filter_items(&items, filter);
        let expected = items
            .iter()
            .filter(|item| filter.matches(item.category))
            .count();
        assert_eq!(kept.len(), expected, "{filter}");
        assert!(kept.iter().all(|item| filter.matches(item.category)));
    }
}

#[test]
fn empty_result_is_valid() {
    let items = vec![news(1, NewsCategory::Weather)];
    assert!(filter_items(&items, CategoryFilter::Government).is_empty());
    assert!(filter_items(&[], CategoryFilter::All).is_empty());
}

#[test]
fn view_defaults_to_all_and_tracks_selection() {
    let mut view = UpdatesView::new(mixed_items()).expect("view");
    assert_eq!(view.selected(), CategoryFilter::All);
    assert_eq!(view.visible().len(), 5);

    assert_eq!(view.select_category(CategoryFilter::Research), 2);
    let snapshot = view.snapshot();
    assert_eq!(snapshot.selected, CategoryFilter::Research);
    assert_eq!(snapshot.items.len(), 2);
    assert!(!snapshot.is_empty());

    assert_eq!(view.select_category(CategoryFilter::All), 5);
    assert_eq!(view.items().len(), 5);
}

#[test]
fn view_rejects_duplicate_ids() {
    let err = UpdatesView::new(vec![
        news(1, NewsCategory::Weather),
        news(1, NewsCategory::Research),
    ])
    .expect_err("duplicate id");
    assert_eq!(err, DomainError::DuplicateItemId(1));
}

#[test]
fn selecting_research_from_default_catalog_yields_single_item() {
    let mut view = UpdatesView::new(crate::catalog::default_catalog()).expect("view");
    view.select_category(CategoryFilter::Research);
    let visible = view.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Latest Trends in Organic Farming");
}
