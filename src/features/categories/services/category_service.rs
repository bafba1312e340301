use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &dto.name))?;

        tracing::info!("Category created: id={}, name={}", category.id, category.name);

        Ok(category.into())
    }

    /// List all categories, name-ordered
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Partial update; omitted fields keep their current value
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, dto.name.as_deref().unwrap_or("")))?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))
    }

    /// Delete a category; its units go with it (FK cascade)
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category '{}' not found", id)));
        }

        tracing::info!("Category deleted: id={}", id);

        Ok(())
    }

    fn map_unique_violation(e: sqlx::Error, name: &str) -> AppError {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            AppError::Conflict(format!("Category '{}' already exists", name))
        } else {
            tracing::error!("Category query failed: {:?}", e);
            AppError::Database(e)
        }
    }
}
