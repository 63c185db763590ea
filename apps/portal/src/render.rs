//! Plain-text rendering of the two views.

use std::fmt::Write as _;

use chrono::NaiveDate;
use portal_core::{
    ndvi::{NdviState, NdviView},
    updates::{UpdatesView, EMPTY_STATE_MESSAGE},
};
use shared::domain::{CategoryFilter, ColorBand, MetricReading, NewsItem, VegetationStatus};

const GAUGE_WIDTH: usize = 20;

const SCALE: [VegetationStatus; 5] = [
    VegetationStatus::Poor,
    VegetationStatus::Fair,
    VegetationStatus::Good,
    VegetationStatus::VeryGood,
    VegetationStatus::Excellent,
];

/// US-style short date, e.g. `4/15/2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn category_selector(selected: CategoryFilter) -> String {
    CategoryFilter::OPTIONS
        .iter()
        .map(|option| {
            if *option == selected {
                format!("[{}]", option.label())
            } else {
                format!(" {} ", option.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn news_card(item: &NewsItem) -> String {
    format!(
        "[{}] {}\n  {}\n  {} | {}\n",
        item.category.badge(),
        item.title,
        item.description,
        format_date(item.date),
        item.author
    )
}

pub fn render_updates(view: &UpdatesView) -> String {
    let mut out = String::new();
    out.push_str("Agricultural Updates\n");
    out.push_str("Stay informed with the latest news and developments\n\n");
    out.push_str(&category_selector(view.selected()));
    out.push_str("\n\n");

    let visible = view.visible();
    if visible.is_empty() {
        out.push_str(EMPTY_STATE_MESSAGE);
        out.push('\n');
        return out;
    }
    for item in visible {
        out.push_str(&news_card(item));
        out.push('\n');
    }
    out
}

pub fn gauge(reading: &MetricReading) -> String {
    let filled = (reading.metric.value() * GAUGE_WIDTH as f64).round() as usize;
    let filled = filled.min(GAUGE_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled))
}

pub fn color_scale(active: ColorBand) -> String {
    SCALE
        .iter()
        .map(|status| {
            let band = ColorBand::from(*status);
            if band == active {
                format!("*{} {}*", band.id(), status.label())
            } else {
                format!("{} {}", band.id(), status.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_ndvi(view: &NdviView) -> String {
    let mut out = String::new();
    out.push_str("NDVI Analysis\n");
    if view.region().is_empty() {
        out.push_str("Region: none selected\n");
    } else {
        let _ = writeln!(out, "Region: {} points", view.region().len());
    }

    match view.state() {
        NdviState::Idle => out.push_str("Select a region on the map to analyze vegetation.\n"),
        NdviState::Loading { .. } => out.push_str("Analyzing region...\n"),
        NdviState::MetricReady(reading) => {
            let _ = writeln!(
                out,
                "NDVI: {}  {}\nStatus: {} (band {}, {})\nScale: {}",
                reading.metric,
                gauge(reading),
                reading.status,
                reading.band.id(),
                reading.band.hex(),
                color_scale(reading.band)
            );
        }
        NdviState::Failed { error } => {
            let _ = writeln!(out, "{}", error.user_message());
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
