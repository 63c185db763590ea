//! News catalog: the built-in articles, or a JSON file replacing them.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use shared::domain::{NewsCategory, NewsItem, NewsItemId};

use crate::updates::ensure_unique_ids;

fn item(
    id: i64,
    title: &str,
    description: &str,
    (year, month, day): (i32, u32, u32),
    author: &str,
    category: NewsCategory,
) -> NewsItem {
    NewsItem {
        id: NewsItemId(id),
        title: title.to_string(),
        description: description.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).expect("valid built-in date"),
        author: author.to_string(),
        category,
    }
}

pub fn default_catalog() -> Vec<NewsItem> {
    vec![
        item(
            1,
            "New Government Scheme for Farmers",
            "The government has announced a new scheme to provide financial assistance to small-scale farmers...",
            (2024, 4, 15),
            "Ministry of Agriculture",
            NewsCategory::Government,
        ),
        item(
            2,
            "Latest Trends in Organic Farming",
            "Discover the newest techniques and practices in organic farming that are revolutionizing the industry...",
            (2024, 4, 14),
            "Agricultural Research Institute",
            NewsCategory::Research,
        ),
        item(
            3,
            "Weather Advisory for Next Week",
            "Important weather updates and farming recommendations for the upcoming week...",
            (2024, 4, 13),
            "Meteorological Department",
            NewsCategory::Weather,
        ),
    ]
}

pub fn parse_catalog(raw: &str) -> Result<Vec<NewsItem>> {
    let items: Vec<NewsItem> =
        serde_json::from_str(raw).context("news catalog is not a JSON array of items")?;
    ensure_unique_ids(&items)?;
    Ok(items)
}

pub fn load_catalog(path: &Path) -> Result<Vec<NewsItem>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read news catalog '{}'", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("invalid news catalog '{}'", path.display()))
}
