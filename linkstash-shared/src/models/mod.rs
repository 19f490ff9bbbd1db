/// Database models for Linkstash
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: Ownership anchor for submitted resources
/// - `license`: Licenses a resource may reference
/// - `resource_category`: Categories a resource may reference
/// - `tag`: Case-insensitive labels, many-to-many with resources
/// - `resource`: The cataloged links themselves, with filtering and pagination
///
/// # Example
///
/// ```no_run
/// use linkstash_shared::models::resource::{CreateResource, Resource};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let resource = Resource::create(&pool, CreateResource {
///     user_id,
///     title: "The Rust Book".to_string(),
///     url: "https://doc.rust-lang.org/book/".to_string(),
///     description: None,
///     license_id: None,
///     resource_category_id: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod license;
pub mod resource;
pub mod resource_category;
pub mod tag;
pub mod user;
