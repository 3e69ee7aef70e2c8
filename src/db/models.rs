use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database representation of an opening with all fields
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct OpeningRow {
    pub id: i64,
    pub role: String,
    pub company: String,
    pub location: String,
    pub remote: bool,
    pub link: Option<String>,
    pub salary: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the store writes for a new or updated opening.
///
/// Carries no id or timestamps: those are owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOpening {
    pub role: String,
    pub company: String,
    pub location: String,
    pub remote: bool,
    pub link: Option<String>,
    pub salary: Option<i64>,
}
