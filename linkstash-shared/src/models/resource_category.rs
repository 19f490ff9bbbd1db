/// Resource category model
///
/// Categories are referenced, not owned, by resources, with the same
/// permissive lookup semantics as licenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A category a resource may be filed under
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResourceCategory {
    /// Unique category ID
    pub id: Uuid,

    /// Category name (e.g., "Screencast")
    pub category: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResourceCategory {
    /// Category name
    pub category: String,
}

impl ResourceCategory {
    /// Creates a new category
    pub async fn create(
        pool: &PgPool,
        data: CreateResourceCategory,
    ) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, ResourceCategory>(
            r#"
            INSERT INTO resource_categories (category)
            VALUES ($1)
            RETURNING id, category, created_at
            "#,
        )
        .bind(data.category)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Finds a category by ID
    ///
    /// Returns None for unknown ids; callers treat a missing reference as an
    /// unset one rather than an error.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, ResourceCategory>(
            "SELECT id, category, created_at FROM resource_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }
}
