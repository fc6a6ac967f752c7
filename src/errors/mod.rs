use std::fmt;
use std::error::Error;

use crate::models::Family;

#[derive(Debug)]
pub enum OsrsError {
    MalformedFeed(String),
    InvalidAccountType(String),
    UnknownCategory { family: Family, name: String },
    InvalidFieldName { family: Family, field: String },
    CategoryUnavailable { family: Family },
    PlayerNotFound(String),
    UpstreamNotFound(String),
    ItemNotFound(String),
    ApiError(String),
    ParseError(String),
    NetworkError(String),
    DatabaseError(String),
    ConfigError(String),
    IoError(String),
}

impl fmt::Display for OsrsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsrsError::MalformedFeed(msg) => write!(f, "Malformed Feed: {}", msg),
            OsrsError::InvalidAccountType(tag) => write!(
                f,
                "Invalid Account Type: '{}' (expected N, IM, UIM, HIM or HIC)",
                tag
            ),
            OsrsError::UnknownCategory { family, name } => {
                write!(f, "Unknown {}: '{}' does not exist", family.label(), name)
            }
            OsrsError::InvalidFieldName { family, field } => write!(
                f,
                "Invalid {} Field: '{}' (expected one of {})",
                family.label(),
                field,
                family.fields().join(", ")
            ),
            OsrsError::CategoryUnavailable { family } => write!(
                f,
                "Category Unavailable: {} data was not part of the parsed feed",
                family.label()
            ),
            OsrsError::PlayerNotFound(msg) => write!(f, "Player Not Found: {}", msg),
            OsrsError::UpstreamNotFound(msg) => write!(f, "Upstream Not Found: {}", msg),
            OsrsError::ItemNotFound(msg) => write!(f, "Item Not Found: {}", msg),
            OsrsError::ApiError(msg) => write!(f, "API Error: {}", msg),
            OsrsError::ParseError(msg) => write!(f, "Parse Error: {}", msg),
            OsrsError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            OsrsError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            OsrsError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
            OsrsError::IoError(msg) => write!(f, "IO Error: {}", msg),
        }
    }
}

impl Error for OsrsError {}

impl OsrsError {
    /// The lookup family this error refers to, if it is a lookup error.
    pub fn family(&self) -> Option<Family> {
        match self {
            OsrsError::UnknownCategory { family, .. }
            | OsrsError::InvalidFieldName { family, .. }
            | OsrsError::CategoryUnavailable { family } => Some(*family),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OsrsError {
    fn from(err: reqwest::Error) -> Self {
        OsrsError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for OsrsError {
    fn from(err: serde_json::Error) -> Self {
        OsrsError::ParseError(err.to_string())
    }
}

impl From<sqlx::Error> for OsrsError {
    fn from(err: sqlx::Error) -> Self {
        OsrsError::DatabaseError(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for OsrsError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        OsrsError::DatabaseError(err.to_string())
    }
}

impl From<std::io::Error> for OsrsError {
    fn from(err: std::io::Error) -> Self {
        OsrsError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OsrsError>;
