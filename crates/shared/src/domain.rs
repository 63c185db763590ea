use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(NewsItemId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    Government,
    Research,
    Weather,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 3] = [
        NewsCategory::Government,
        NewsCategory::Research,
        NewsCategory::Weather,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NewsCategory::Government => "government",
            NewsCategory::Research => "research",
            NewsCategory::Weather => "weather",
        }
    }

    /// Badge text shown on a card, e.g. `Government`.
    pub fn badge(self) -> &'static str {
        match self {
            NewsCategory::Government => "Government",
            NewsCategory::Research => "Research",
            NewsCategory::Weather => "Weather",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selector state of the updates view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Government,
    Research,
    Weather,
}

impl CategoryFilter {
    pub const OPTIONS: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Government,
        CategoryFilter::Research,
        CategoryFilter::Weather,
    ];

    pub fn matches(self, category: NewsCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Government => category == NewsCategory::Government,
            CategoryFilter::Research => category == NewsCategory::Research,
            CategoryFilter::Weather => category == NewsCategory::Weather,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All Updates",
            CategoryFilter::Government => "Government Schemes",
            CategoryFilter::Research => "Research & Innovation",
            CategoryFilter::Weather => "Weather Updates",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Government => "government",
            CategoryFilter::Research => "research",
            CategoryFilter::Weather => "weather",
        }
    }
}

impl From<NewsCategory> for CategoryFilter {
    fn from(value: NewsCategory) -> Self {
        match value {
            NewsCategory::Government => CategoryFilter::Government,
            NewsCategory::Research => CategoryFilter::Research,
            NewsCategory::Weather => CategoryFilter::Weather,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "government" => Ok(CategoryFilter::Government),
            "research" => Ok(CategoryFilter::Research),
            "weather" => Ok(CategoryFilter::Weather),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsItemId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub author: String,
    pub category: NewsCategory,
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }
}

impl FromStr for Coordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidRegion(format!("expected 'lat,lng', got '{s}'")))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|err| DomainError::InvalidRegion(format!("bad latitude '{lat}': {err}")))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|err| DomainError::InvalidRegion(format!("bad longitude '{lng}': {err}")))?;
        Coordinate::new(lat, lng)
    }
}

/// User-drawn polygon. An empty region means nothing is selected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(Vec<Coordinate>);

impl Region {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self(points)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Coordinate>> for Region {
    fn from(points: Vec<Coordinate>) -> Self {
        Self(points)
    }
}

/// Parses `lat,lng;lat,lng;...`. Blank input yields the empty region.
impl FromStr for Region {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Coordinate::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Region)
    }
}

/// NDVI value, guaranteed to lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct VegetationMetric(f64);

impl VegetationMetric {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DomainError::InvalidMetric(value));
        }
        Ok(Self(value))
    }

    /// Pulls a finite value into range; NaN maps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for VegetationMetric {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VegetationMetric> for f64 {
    fn from(value: VegetationMetric) -> Self {
        value.0
    }
}

impl fmt::Display for VegetationMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VegetationStatus {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl VegetationStatus {
    pub fn label(self) -> &'static str {
        match self {
            VegetationStatus::Poor => "Poor",
            VegetationStatus::Fair => "Fair",
            VegetationStatus::Good => "Good",
            VegetationStatus::VeryGood => "Very Good",
            VegetationStatus::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for VegetationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Five-step color scale, red through dark green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Red = 1,
    Orange = 2,
    Yellow = 3,
    LightGreen = 4,
    DarkGreen = 5,
}

impl ColorBand {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorBand::Red => "#d73027",
            ColorBand::Orange => "#fc8d59",
            ColorBand::Yellow => "#fee08b",
            ColorBand::LightGreen => "#91cf60",
            ColorBand::DarkGreen => "#1a9850",
        }
    }
}

impl From<VegetationStatus> for ColorBand {
    fn from(status: VegetationStatus) -> Self {
        match status {
            VegetationStatus::Poor => ColorBand::Red,
            VegetationStatus::Fair => ColorBand::Orange,
            VegetationStatus::Good => ColorBand::Yellow,
            VegetationStatus::VeryGood => ColorBand::LightGreen,
            VegetationStatus::Excellent => ColorBand::DarkGreen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub metric: VegetationMetric,
    pub status: VegetationStatus,
    pub band: ColorBand,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
