//! Agricultural updates listing with client-side category filtering.

use std::collections::HashSet;

use shared::{
    domain::{CategoryFilter, NewsItem},
    error::DomainError,
    protocol::UpdatesSnapshot,
};
use tracing::debug;

pub const EMPTY_STATE_MESSAGE: &str = "No updates in this category yet.";

/// Order-preserving subsequence of `items` accepted by `selected`.
pub fn filter_items(items: &[NewsItem], selected: CategoryFilter) -> Vec<&NewsItem> {
    items
        .iter()
        .filter(|item| selected.matches(item.category))
        .collect()
}

#[derive(Debug, Clone)]
pub struct UpdatesView {
    items: Vec<NewsItem>,
    selected: CategoryFilter,
}

impl UpdatesView {
    pub fn new(items: Vec<NewsItem>) -> Result<Self, DomainError> {
        ensure_unique_ids(&items)?;
        Ok(Self {
            items,
            selected: CategoryFilter::default(),
        })
    }

    /// Switches the selector and returns how many items are now visible.
    pub fn select_category(&mut self, selected: CategoryFilter) -> usize {
        self.selected = selected;
        let visible = self.visible().len();
        debug!(category = %selected, visible, "updates category selected");
        visible
    }

    pub fn selected(&self) -> CategoryFilter {
        self.selected
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn visible(&self) -> Vec<&NewsItem> {
        filter_items(&self.items, self.selected)
    }

    pub fn snapshot(&self) -> UpdatesSnapshot {
        UpdatesSnapshot {
            selected: self.selected,
            items: self.visible().into_iter().cloned().collect(),
        }
    }
}

pub(crate) fn ensure_unique_ids(items: &[NewsItem]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(DomainError::DuplicateItemId(item.id.0));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/updates_tests.rs"]
mod tests;
