/// Resource model and catalog queries
///
/// A resource is a cataloged external link: title, url, optional description,
/// an immutable owner, optional license and category references, and a set of
/// tags. This module carries both the CRUD operations and the catalog's query
/// composition: optional AND-combined filters (tag, license, title search)
/// over a paginated listing.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE resources (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     url VARCHAR(2048) NOT NULL,
///     description TEXT,
///     license_id UUID REFERENCES licenses(id) ON DELETE SET NULL,
///     resource_category_id UUID REFERENCES resource_categories(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use linkstash_shared::models::resource::{Resource, ResourceFilter};
/// use linkstash_shared::pagination::PageRequest;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let filter = ResourceFilter {
///     tagged: Some("rust".to_string()),
///     ..Default::default()
/// };
/// let page = PageRequest::default();
///
/// let total = Resource::count_filtered(&pool, &filter).await?;
/// let items = Resource::list_filtered(&pool, &filter, &page).await?;
/// # Ok(())
/// # }
/// ```

use crate::pagination::PageRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

const RESOURCE_COLUMNS: &str =
    "id, user_id, title, url, description, license_id, resource_category_id, \
     created_at, updated_at";

/// A cataloged external link
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Resource {
    /// Unique resource ID
    pub id: Uuid,

    /// Owner; set at creation and never changed
    pub user_id: Uuid,

    /// Human-readable title
    pub title: String,

    /// The link itself; always satisfies the URL grammar after normalization
    pub url: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Optional license reference
    pub license_id: Option<Uuid>,

    /// Optional category reference
    pub resource_category_id: Option<Uuid>,

    /// When the resource was created
    pub created_at: DateTime<Utc>,

    /// When the resource was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResource {
    /// Owner of the new resource
    pub user_id: Uuid,

    /// Title
    pub title: String,

    /// Normalized, validated url
    pub url: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional license reference (already resolved to an existing row)
    pub license_id: Option<Uuid>,

    /// Optional category reference (already resolved to an existing row)
    pub resource_category_id: Option<Uuid>,
}

/// Input for updating a resource
///
/// Updates replace every mutable field; the owner is not among them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResource {
    /// New title
    pub title: String,

    /// New normalized, validated url
    pub url: String,

    /// New description
    pub description: Option<String>,

    /// New license reference
    pub license_id: Option<Uuid>,

    /// New category reference
    pub resource_category_id: Option<Uuid>,
}

/// Catalog filters, AND-combined, each optional
///
/// `tagged` is matched against the registry's normalized tag names; callers
/// normalize the raw parameter before building the filter. `search` is a
/// case-insensitive substring match on the title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Restrict to resources carrying this tag name
    pub tagged: Option<String>,

    /// Restrict to resources with this license
    pub license: Option<Uuid>,

    /// Restrict to resources whose title contains this text
    pub search: Option<String>,
}

impl ResourceFilter {
    /// Builds the WHERE clause for the active filters
    ///
    /// Returns the clause (empty when no filter is active) and the number of
    /// bind placeholders it consumed. Binds must be applied in declaration
    /// order: tagged, license, search.
    fn conditions(&self) -> (String, usize) {
        let mut conditions = Vec::new();
        let mut binds = 0;

        if self.tagged.is_some() {
            binds += 1;
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM resources_tags rt \
                 JOIN tags t ON t.id = rt.tag_id \
                 WHERE rt.resource_id = resources.id AND t.tag_name = ${binds})"
            ));
        }

        if self.license.is_some() {
            binds += 1;
            conditions.push(format!("license_id = ${binds}"));
        }

        if self.search.is_some() {
            binds += 1;
            conditions.push(format!("title ILIKE ${binds}"));
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        (clause, binds)
    }

    fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|text| format!("%{text}%"))
    }
}

impl Resource {
    /// Creates a new resource
    ///
    /// The caller has already normalized the url and resolved any reference
    /// ids; `user_id` is the authenticated identity, never request input.
    pub async fn create(pool: &PgPool, data: CreateResource) -> Result<Self, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO resources (user_id, title, url, description, license_id, resource_category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RESOURCE_COLUMNS}
            "#
        );

        let resource = sqlx::query_as::<_, Resource>(&sql)
            .bind(data.user_id)
            .bind(data.title)
            .bind(data.url)
            .bind(data.description)
            .bind(data.license_id)
            .bind(data.resource_category_id)
            .fetch_one(pool)
            .await?;

        Ok(resource)
    }

    /// Finds a resource by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1");

        let resource = sqlx::query_as::<_, Resource>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(resource)
    }

    /// Replaces a resource's mutable fields
    ///
    /// Returns None when no resource with the given id exists. The owner is
    /// left untouched.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateResource,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE resources
            SET title = $2,
                url = $3,
                description = $4,
                license_id = $5,
                resource_category_id = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {RESOURCE_COLUMNS}
            "#
        );

        let resource = sqlx::query_as::<_, Resource>(&sql)
            .bind(id)
            .bind(data.title)
            .bind(data.url)
            .bind(data.description)
            .bind(data.license_id)
            .bind(data.resource_category_id)
            .fetch_optional(pool)
            .await?;

        Ok(resource)
    }

    /// Deletes a resource
    ///
    /// Join rows cascade away; tag rows are untouched (the registry is
    /// append-only).
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces a resource's tag set (clear-then-reapply)
    ///
    /// Runs in a transaction so a concurrent delete of the resource cannot
    /// leave a half-applied tag set behind.
    pub async fn set_tags(
        pool: &PgPool,
        resource_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM resources_tags WHERE resource_id = $1")
            .bind(resource_id)
            .execute(&mut *tx)
            .await?;

        for tag_id in tag_ids {
            sqlx::query(
                r#"
                INSERT INTO resources_tags (resource_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT (resource_id, tag_id) DO NOTHING
                "#,
            )
            .bind(resource_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Counts the filtered set
    pub async fn count_filtered(
        pool: &PgPool,
        filter: &ResourceFilter,
    ) -> Result<i64, sqlx::Error> {
        let (clause, _) = filter.conditions();
        let sql = format!("SELECT COUNT(*) FROM resources{clause}");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);

        if let Some(tagged) = &filter.tagged {
            query = query.bind(tagged);
        }
        if let Some(license) = filter.license {
            query = query.bind(license);
        }
        if let Some(pattern) = filter.search_pattern() {
            query = query.bind(pattern);
        }

        query.fetch_one(pool).await
    }

    /// Lists one page of the filtered set, newest first
    ///
    /// Pages past the end of the set come back empty.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &ResourceFilter,
        page: &PageRequest,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let (clause, binds) = filter.conditions();
        let sql = format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources{clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${} OFFSET ${}",
            binds + 1,
            binds + 2
        );

        let mut query = sqlx::query_as::<_, Resource>(&sql);

        if let Some(tagged) = &filter.tagged {
            query = query.bind(tagged);
        }
        if let Some(license) = filter.license {
            query = query.bind(license);
        }
        if let Some(pattern) = filter.search_pattern() {
            query = query.bind(pattern);
        }

        query.bind(page.limit()).bind(page.offset()).fetch_all(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_no_clause() {
        let filter = ResourceFilter::default();
        let (clause, binds) = filter.conditions();
        assert_eq!(clause, "");
        assert_eq!(binds, 0);
    }

    #[test]
    fn test_single_filter_clauses() {
        let filter = ResourceFilter {
            tagged: Some("rust".to_string()),
            ..Default::default()
        };
        let (clause, binds) = filter.conditions();
        assert!(clause.contains("t.tag_name = $1"));
        assert_eq!(binds, 1);

        let filter = ResourceFilter {
            license: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let (clause, binds) = filter.conditions();
        assert_eq!(clause, " WHERE license_id = $1");
        assert_eq!(binds, 1);

        let filter = ResourceFilter {
            search: Some("one".to_string()),
            ..Default::default()
        };
        let (clause, binds) = filter.conditions();
        assert_eq!(clause, " WHERE title ILIKE $1");
        assert_eq!(binds, 1);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filter = ResourceFilter {
            tagged: Some("rust".to_string()),
            license: Some(Uuid::new_v4()),
            search: Some("book".to_string()),
        };
        let (clause, binds) = filter.conditions();
        assert_eq!(binds, 3);
        assert_eq!(clause.matches(" AND ").count(), 2);
        assert!(clause.contains("t.tag_name = $1"));
        assert!(clause.contains("license_id = $2"));
        assert!(clause.contains("title ILIKE $3"));
    }

    #[test]
    fn test_placeholders_renumber_when_tag_absent() {
        let filter = ResourceFilter {
            license: Some(Uuid::new_v4()),
            search: Some("book".to_string()),
            ..Default::default()
        };
        let (clause, binds) = filter.conditions();
        assert_eq!(binds, 2);
        assert!(clause.contains("license_id = $1"));
        assert!(clause.contains("title ILIKE $2"));
    }

    #[test]
    fn test_search_pattern_wraps_in_wildcards() {
        let filter = ResourceFilter {
            search: Some("one".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_pattern(), Some("%one%".to_string()));

        assert_eq!(ResourceFilter::default().search_pattern(), None);
    }
}
