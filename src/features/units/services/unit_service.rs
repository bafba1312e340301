use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::units::dtos::{CreateUnitDto, ReorderUnitsDto, UnitResponseDto, UpdateUnitDto};
use crate::features::units::models::Unit;

const UNIT_COLUMNS: &str = "id, category_id, title, description, position, created_at, updated_at";

/// Service for unit operations.
///
/// Every write that touches `position` runs in a transaction so the
/// per-category sequence stays contiguous even under concurrent admins.
pub struct UnitService {
    pool: PgPool,
}

impl UnitService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a unit, appended at the end of its category's sequence
    pub async fn create(&self, dto: CreateUnitDto) -> Result<UnitResponseDto> {
        let unit = sqlx::query_as::<_, Unit>(&format!(
            r#"
            INSERT INTO units (category_id, title, description, position)
            SELECT $1, $2, $3, COALESCE(MAX(position), 0) + 1
            FROM units
            WHERE category_id = $1
            RETURNING {UNIT_COLUMNS}
            "#
        ))
        .bind(dto.category_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                AppError::NotFound(format!("Category '{}' not found", dto.category_id))
            } else {
                tracing::error!("Failed to create unit: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!(
            "Unit created: id={}, category_id={}, position={}",
            unit.id,
            unit.category_id,
            unit.position
        );

        Ok(unit.into())
    }

    /// List units, optionally restricted to one category, position-ordered
    pub async fn list(&self, category_id: Option<Uuid>) -> Result<Vec<UnitResponseDto>> {
        let units = match category_id {
            Some(category_id) => {
                sqlx::query_as::<_, Unit>(&format!(
                    r#"
                    SELECT {UNIT_COLUMNS}
                    FROM units
                    WHERE category_id = $1
                    ORDER BY position
                    "#
                ))
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Unit>(&format!(
                    r#"
                    SELECT {UNIT_COLUMNS}
                    FROM units
                    ORDER BY category_id, position
                    "#
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(units.into_iter().map(|u| u.into()).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UnitResponseDto> {
        let unit = sqlx::query_as::<_, Unit>(&format!(
            r#"
            SELECT {UNIT_COLUMNS}
            FROM units
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        unit.map(|u| u.into())
            .ok_or_else(|| AppError::NotFound(format!("Unit '{}' not found", id)))
    }

    /// Partial update; omitted fields keep their current value
    pub async fn update(&self, id: Uuid, dto: UpdateUnitDto) -> Result<UnitResponseDto> {
        let unit = sqlx::query_as::<_, Unit>(&format!(
            r#"
            UPDATE units
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {UNIT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_optional(&self.pool)
        .await?;

        unit.map(|u| u.into())
            .ok_or_else(|| AppError::NotFound(format!("Unit '{}' not found", id)))
    }

    /// Delete a unit and close the position gap it leaves behind
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, (Uuid, i32)>(
            r#"
            DELETE FROM units
            WHERE id = $1
            RETURNING category_id, position
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((category_id, position)) = deleted else {
            return Err(AppError::NotFound(format!("Unit '{}' not found", id)));
        };

        sqlx::query(
            r#"
            UPDATE units
            SET position = position - 1, updated_at = NOW()
            WHERE category_id = $1 AND position > $2
            "#,
        )
        .bind(category_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("Unit deleted: id={}, category_id={}", id, category_id);

        Ok(())
    }

    /// Atomically rewrite the position sequence of a category's units.
    ///
    /// The submitted ids are checked against the category's current unit set
    /// under a row lock; any mismatch aborts before a single position is
    /// written, so a failed reorder is never partially applied.
    pub async fn reorder(&self, dto: ReorderUnitsDto) -> Result<Vec<UnitResponseDto>> {
        let mut tx = self.pool.begin().await?;

        let existing: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM units
            WHERE category_id = $1
            FOR UPDATE
            "#,
        )
        .bind(dto.category_id)
        .fetch_all(&mut *tx)
        .await?;

        if existing.is_empty() {
            return Err(AppError::NotFound(format!(
                "Category '{}' has no units to reorder",
                dto.category_id
            )));
        }

        let existing: Vec<Uuid> = existing.into_iter().map(|(id,)| id).collect();
        validate_reorder_set(&dto.unit_ids, &existing)?;

        for (index, unit_id) in dto.unit_ids.iter().enumerate() {
            sqlx::query(
                r#"
                UPDATE units
                SET position = $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(unit_id)
            .bind((index + 1) as i32)
            .execute(&mut *tx)
            .await?;
        }

        let units = sqlx::query_as::<_, Unit>(&format!(
            r#"
            SELECT {UNIT_COLUMNS}
            FROM units
            WHERE category_id = $1
            ORDER BY position
            "#
        ))
        .bind(dto.category_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Units reordered: category_id={}, count={}",
            dto.category_id,
            units.len()
        );

        Ok(units.into_iter().map(|u| u.into()).collect())
    }
}

/// The submitted ordering must be a permutation of the category's unit set
fn validate_reorder_set(submitted: &[Uuid], existing: &[Uuid]) -> Result<()> {
    let mut seen = HashSet::with_capacity(submitted.len());
    for id in submitted {
        if !seen.insert(*id) {
            return Err(AppError::Validation(format!(
                "Duplicate unit id '{}' in reorder request",
                id
            )));
        }
    }

    let existing_set: HashSet<Uuid> = existing.iter().copied().collect();

    if let Some(stranger) = submitted.iter().find(|id| !existing_set.contains(id)) {
        return Err(AppError::Validation(format!(
            "Unit '{}' does not belong to this category",
            stranger
        )));
    }

    if submitted.len() != existing.len() {
        return Err(AppError::Validation(format!(
            "Reorder must include every unit exactly once ({} submitted, {} in category)",
            submitted.len(),
            existing.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn accepts_a_permutation_of_the_category_set() {
        let existing = ids(3);
        let submitted = vec![existing[2], existing[0], existing[1]];

        assert!(validate_reorder_set(&submitted, &existing).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let existing = ids(2);
        let submitted = vec![existing[0], existing[0]];

        assert!(matches!(
            validate_reorder_set(&submitted, &existing),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_ids_from_another_category() {
        let existing = ids(2);
        let submitted = vec![existing[0], Uuid::new_v4()];

        assert!(matches!(
            validate_reorder_set(&submitted, &existing),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn rejects_incomplete_orderings() {
        let existing = ids(3);
        let submitted = vec![existing[0], existing[1]];

        assert!(matches!(
            validate_reorder_set(&submitted, &existing),
            Err(AppError::Validation(_))
        ));
    }
}
