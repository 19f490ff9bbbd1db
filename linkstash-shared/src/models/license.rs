/// License model
///
/// Licenses are referenced, not owned, by resources. A resource pointing at a
/// license that is later removed falls back to no license (`ON DELETE SET
/// NULL`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A license a resource may be published under
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct License {
    /// Unique license ID
    pub id: Uuid,

    /// License name (e.g., "CC BY-SA 4.0")
    pub name: String,

    /// Link to the license text
    pub url: Option<String>,

    /// When the license was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new license
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLicense {
    /// License name
    pub name: String,

    /// Link to the license text
    pub url: Option<String>,
}

impl License {
    /// Creates a new license
    pub async fn create(pool: &PgPool, data: CreateLicense) -> Result<Self, sqlx::Error> {
        let license = sqlx::query_as::<_, License>(
            r#"
            INSERT INTO licenses (name, url)
            VALUES ($1, $2)
            RETURNING id, name, url, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.url)
        .fetch_one(pool)
        .await?;

        Ok(license)
    }

    /// Finds a license by ID
    ///
    /// Returns None for unknown ids; callers treat a missing reference as an
    /// unset one rather than an error.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let license = sqlx::query_as::<_, License>(
            "SELECT id, name, url, created_at FROM licenses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(license)
    }
}
