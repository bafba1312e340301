use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a course unit.
///
/// `position` is 1-based and contiguous within a category; create, delete
/// and reorder all maintain that invariant.
#[derive(Debug, Clone, FromRow)]
pub struct Unit {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
