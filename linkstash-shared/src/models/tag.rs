/// Tag registry
///
/// Tags are a case-insensitive, append-only identity registry: `"Ruby"` and
/// `"ruby"` are the same tag, tag rows are never deleted even when no
/// resource references them, and concurrent resolution of an unseen name
/// never produces duplicates.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tags (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     tag_name VARCHAR(100) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE resources_tags (
///     resource_id UUID NOT NULL REFERENCES resources(id) ON DELETE CASCADE,
///     tag_id UUID NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
///     PRIMARY KEY (resource_id, tag_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// A named label attachable to many resources
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Unique tag ID
    pub id: Uuid,

    /// Normalized (lowercase, trimmed) tag name
    pub tag_name: String,

    /// When the tag was first resolved
    pub created_at: DateTime<Utc>,
}

/// Normalizes a tag name to its registry identity
///
/// Identity is lowercase and trimmed; every lookup and insert goes through
/// this first.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Tag {
    /// Resolves a tag name to its registry identity, creating it if absent
    ///
    /// Safe under concurrent resolution of the same unseen name: the insert
    /// uses `ON CONFLICT (tag_name) DO NOTHING`, and a loser of that race
    /// falls back to looking up the row the winner created.
    pub async fn resolve(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        let normalized = normalize_name(name);

        if let Some(tag) = Self::find_by_name(pool, &normalized).await? {
            return Ok(tag);
        }

        let inserted = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (tag_name)
            VALUES ($1)
            ON CONFLICT (tag_name) DO NOTHING
            RETURNING id, tag_name, created_at
            "#,
        )
        .bind(&normalized)
        .fetch_optional(pool)
        .await?;

        match inserted {
            Some(tag) => Ok(tag),
            // A concurrent request created the tag between our lookup and
            // insert; re-read it.
            None => {
                sqlx::query_as::<_, Tag>(
                    "SELECT id, tag_name, created_at FROM tags WHERE tag_name = $1",
                )
                .bind(&normalized)
                .fetch_one(pool)
                .await
            }
        }
    }

    /// Finds a tag by its normalized name
    pub async fn find_by_name(pool: &PgPool, tag_name: &str) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, tag_name, created_at FROM tags WHERE tag_name = $1",
        )
        .bind(tag_name)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// Lists the tag names attached to a resource, alphabetically
    pub async fn names_for_resource(
        pool: &PgPool,
        resource_id: Uuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        let names: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT t.tag_name
            FROM resources_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.resource_id = $1
            ORDER BY t.tag_name
            "#,
        )
        .bind(resource_id)
        .fetch_all(pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    /// Lists tag names for a batch of resources in one query
    ///
    /// Resources with no tags are absent from the returned map.
    pub async fn names_for_resources(
        pool: &PgPool,
        resource_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<String>>, sqlx::Error> {
        if resource_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT rt.resource_id, t.tag_name
            FROM resources_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.resource_id = ANY($1)
            ORDER BY t.tag_name
            "#,
        )
        .bind(resource_ids.to_vec())
        .fetch_all(pool)
        .await?;

        let mut by_resource: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (resource_id, tag_name) in rows {
            by_resource.entry(resource_id).or_default().push(tag_name);
        }

        Ok(by_resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_name("Ruby"), "ruby");
        assert_eq!(normalize_name("RUBY"), "ruby");
        assert_eq!(normalize_name("ruby"), "ruby");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_name("  rails "), "rails");
        assert_eq!(normalize_name("\tRails\n"), "rails");
    }

    #[test]
    fn test_normalize_preserves_inner_characters() {
        assert_eq!(normalize_name("Type Script"), "type script");
        assert_eq!(normalize_name("C++"), "c++");
    }

    // Resolution against the registry (including the concurrent-creation
    // race) is exercised in the linkstash-api integration tests.
}
