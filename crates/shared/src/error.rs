use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMetric,
    Validation,
    Transport,
    Timeout,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("vegetation metric {0} is outside [0, 1]")]
    InvalidMetric(f64),
    #[error("coordinate ({lat}, {lng}) is out of range")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("invalid region: {0}")]
    InvalidRegion(String),
    #[error("unknown news category '{0}'")]
    UnknownCategory(String),
    #[error("duplicate news item id {0}")]
    DuplicateItemId(i64),
}

impl DomainError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InvalidMetric(_) => ErrorCode::InvalidMetric,
            DomainError::InvalidCoordinate { .. }
            | DomainError::InvalidRegion(_)
            | DomainError::UnknownCategory(_)
            | DomainError::DuplicateItemId(_) => ErrorCode::Validation,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
