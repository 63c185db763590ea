//! Serializable snapshots of view state, emitted by the CLI's `--json` mode.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{CategoryFilter, MetricReading, NewsItem, Region},
    error::ApiError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NdviPhase {
    Idle,
    Loading,
    MetricReady,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatesSnapshot {
    pub selected: CategoryFilter,
    pub items: Vec<NewsItem>,
}

impl UpdatesSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NdviSnapshot {
    pub phase: NdviPhase,
    pub generation: u64,
    pub region: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<MetricReading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ViewSnapshot {
    Updates(UpdatesSnapshot),
    Ndvi(NdviSnapshot),
}
