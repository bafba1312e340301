use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::units::models::Unit;

/// Request DTO for creating a unit; the new unit is appended to the end
/// of its category's sequence.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUnitDto {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[validate(length(max = 2000, message = "description is too long"))]
    pub description: Option<String>,
}

/// Request DTO for partially updating a unit
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUnitDto {
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "description is too long"))]
    pub description: Option<String>,
}

/// Request DTO for rewriting a category's unit sequence.
///
/// `unit_ids` must list every unit of the category exactly once, in the
/// desired order; positions are assigned from list order.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReorderUnitsDto {
    pub category_id: Uuid,
    #[validate(length(min = 1, message = "unit_ids must not be empty"))]
    pub unit_ids: Vec<Uuid>,
}

/// Query params for listing units
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUnitsQuery {
    /// Restrict the listing to one category
    pub category_id: Option<Uuid>,
}

/// Response DTO for unit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnitResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Unit> for UnitResponseDto {
    fn from(u: Unit) -> Self {
        Self {
            id: u.id,
            category_id: u.category_id,
            title: u.title,
            description: u.description,
            position: u.position,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_non_empty_title() {
        let dto = CreateUnitDto {
            category_id: Uuid::new_v4(),
            title: String::new(),
            description: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn reorder_rejects_empty_id_list() {
        let dto = ReorderUnitsDto {
            category_id: Uuid::new_v4(),
            unit_ids: vec![],
        };
        assert!(dto.validate().is_err());

        let dto = ReorderUnitsDto {
            category_id: Uuid::new_v4(),
            unit_ids: vec![Uuid::new_v4()],
        };
        assert!(dto.validate().is_ok());
    }
}
