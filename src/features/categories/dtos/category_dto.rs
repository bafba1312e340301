use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;

/// Request DTO for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,
    #[validate(length(max = 2000, message = "description is too long"))]
    pub description: Option<String>,
}

/// Request DTO for partially updating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 120, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "description is too long"))]
    pub description: Option<String>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    #[test]
    fn create_requires_non_empty_name() {
        let dto = CreateCategoryDto {
            name: String::new(),
            description: None,
        };
        assert!(dto.validate().is_err());

        let dto = CreateCategoryDto {
            name: "Mathematics".to_string(),
            description: Some(Sentence(3..8).fake()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn update_allows_omitted_fields_but_not_blank_name() {
        let dto = UpdateCategoryDto {
            name: None,
            description: None,
        };
        assert!(dto.validate().is_ok());

        let dto = UpdateCategoryDto {
            name: Some(String::new()),
            description: None,
        };
        assert!(dto.validate().is_err());
    }
}
