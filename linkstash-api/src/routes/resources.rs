/// Catalog resource endpoints
///
/// This module provides the five catalog operations over resources. Every
/// route sits behind the bearer-auth layer; mutation is additionally
/// restricted to the resource's owner.
///
/// # Endpoints
///
/// - `GET /resources` - List with filters (`tagged`, `license`, `search`) and pagination
/// - `GET /resources/:id` - Read a single resource
/// - `POST /resources` - Submit a resource
/// - `PUT /resources/:id` - Replace a resource (owner only)
/// - `DELETE /resources/:id` - Remove a resource (owner only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use linkstash_shared::{
    auth::{
        middleware::AuthContext,
        ownership::{self, ResourceAction},
    },
    models::{
        license::License,
        resource::{CreateResource, Resource, ResourceFilter, UpdateResource},
        resource_category::ResourceCategory,
        tag::{self, Tag},
    },
    pagination::{PageMeta, PageRequest},
    url,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Resource create/update request body
///
/// Updates take the same body as creation and replace every mutable field.
/// There is deliberately no owner field: the owner is always the
/// authenticated identity, so an injected `user_id` in the raw JSON is
/// simply ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct ResourcePayload {
    /// Resource title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// The link; normalized (http:// prefixed if needed) and grammar-checked
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Tag names to attach; resolved case-insensitively through the registry
    #[serde(default)]
    pub tags: Vec<String>,

    /// License reference; an unknown id is treated as absent
    pub license_id: Option<Uuid>,

    /// Category reference; an unknown id is treated as absent
    pub resource_category_id: Option<Uuid>,
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListResourcesParams {
    /// Restrict to resources carrying this tag
    pub tagged: Option<String>,

    /// Restrict to resources with this license id
    pub license: Option<Uuid>,

    /// Restrict to resources whose title contains this text
    pub search: Option<String>,

    /// 1-indexed page number (default 1)
    pub page: Option<u32>,

    /// Page size (default 10)
    pub per_page: Option<u32>,
}

/// Hypermedia link
#[derive(Debug, Serialize)]
pub struct LinkJson {
    /// Relation of the link to this resource
    pub rel: String,

    /// Target path
    pub href: String,
}

/// Resource representation returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ResourceJson {
    /// Resource ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Normalized url
    pub url: String,

    /// Description
    pub description: Option<String>,

    /// Attached tag names, alphabetical
    pub tags: Vec<String>,

    /// Category reference
    pub resource_category_id: Option<Uuid>,

    /// License reference
    pub license_id: Option<Uuid>,

    /// Navigation links
    pub links: Vec<LinkJson>,
}

impl ResourceJson {
    /// Assembles the wire representation from a stored resource and its tags
    fn assemble(resource: Resource, tags: Vec<String>) -> Self {
        let links = vec![
            LinkJson {
                rel: "self".to_string(),
                href: format!("/resources/{}", resource.id),
            },
            LinkJson {
                rel: "resources".to_string(),
                href: "/resources/".to_string(),
            },
        ];

        Self {
            id: resource.id,
            title: resource.title,
            url: resource.url,
            description: resource.description,
            tags,
            resource_category_id: resource.resource_category_id,
            license_id: resource.license_id,
            links,
        }
    }
}

/// Single-resource response envelope
#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    /// The resource
    pub resource: ResourceJson,
}

/// Listing response envelope
#[derive(Debug, Serialize)]
pub struct ListResourcesResponse {
    /// One page of the filtered set
    pub resources: Vec<ResourceJson>,

    /// Pagination metadata for the filtered set
    pub meta: PageMeta,
}

/// Maps validator errors to field-level details
fn validation_details(e: validator::ValidationErrors) -> Vec<ValidationErrorDetail> {
    e.field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect()
}

/// Builds the catalog filter from raw query parameters
///
/// Empty parameters impose no restriction. The `tagged` value is normalized
/// to the registry's identity before lookup, so `?tagged=Ruby` matches
/// resources tagged `ruby`.
fn build_filter(params: &ListResourcesParams) -> ResourceFilter {
    ResourceFilter {
        tagged: params
            .tagged
            .as_deref()
            .map(tag::normalize_name)
            .filter(|name| !name.is_empty()),
        license: params.license,
        search: params.search.clone().filter(|text| !text.is_empty()),
    }
}

/// Payload fields that needed normalization or resolution against the store
struct CheckedPayload {
    url: String,
    license_id: Option<Uuid>,
    resource_category_id: Option<Uuid>,
}

/// Validates a create/update payload and resolves its references
///
/// Runs before any write: field validation, url normalization plus grammar
/// check, and permissive reference resolution (unknown license/category ids
/// become absent references, not errors).
async fn check_payload(state: &AppState, req: &ResourcePayload) -> ApiResult<CheckedPayload> {
    req.validate()
        .map_err(|e| ApiError::ValidationError(validation_details(e)))?;

    let normalized = url::normalize(&req.url);
    if !url::is_valid(&normalized) {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "url".to_string(),
            message: "is not a valid URL".to_string(),
        }]));
    }

    let license_id = match req.license_id {
        Some(id) => License::find_by_id(&state.db, id).await?.map(|license| license.id),
        None => None,
    };

    let resource_category_id = match req.resource_category_id {
        Some(id) => ResourceCategory::find_by_id(&state.db, id)
            .await?
            .map(|category| category.id),
        None => None,
    };

    Ok(CheckedPayload {
        url: normalized,
        license_id,
        resource_category_id,
    })
}

/// Replaces a resource's tag set from the requested names
///
/// Resolves each name through the registry (get-or-create), applies the set
/// clear-then-reapply, and returns the resulting names for serialization.
async fn apply_tags(
    state: &AppState,
    resource_id: Uuid,
    names: &[String],
) -> ApiResult<Vec<String>> {
    let mut tag_ids = Vec::with_capacity(names.len());
    for name in names {
        let tag = Tag::resolve(&state.db, name).await?;
        tag_ids.push(tag.id);
    }

    Resource::set_tags(&state.db, resource_id, &tag_ids).await?;

    Tag::names_for_resource(&state.db, resource_id)
        .await
        .map_err(Into::into)
}

/// List resources
///
/// Returns one page of the filtered catalog. Filters AND-combine; absent or
/// empty parameters impose no restriction, and a page past the end of the
/// set is an empty success, not an error.
///
/// # Endpoint
///
/// ```text
/// GET /resources?tagged=ruby&license=<id>&search=book&page=2&per_page=5
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "resources": [ ... ],
///   "meta": { "total": 15, "page": 2, "count": 5, "num_pages": 3 }
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid bearer token
pub async fn list_resources(
    State(state): State<AppState>,
    Query(params): Query<ListResourcesParams>,
) -> ApiResult<Json<ListResourcesResponse>> {
    let filter = build_filter(&params);
    let page = PageRequest::new(params.page, params.per_page);

    let total = Resource::count_filtered(&state.db, &filter).await? as u64;
    let items = Resource::list_filtered(&state.db, &filter, &page).await?;

    let ids: Vec<Uuid> = items.iter().map(|resource| resource.id).collect();
    let mut tags_by_resource = Tag::names_for_resources(&state.db, &ids).await?;

    let resources: Vec<ResourceJson> = items
        .into_iter()
        .map(|resource| {
            let tags = tags_by_resource.remove(&resource.id).unwrap_or_default();
            ResourceJson::assemble(resource, tags)
        })
        .collect();

    let meta = PageMeta::compute(total, &page, resources.len() as u64);

    Ok(Json(ListResourcesResponse { resources, meta }))
}

/// Get a single resource
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid bearer token
/// - `404 Not Found`: No resource with this id
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ResourceResponse>> {
    let resource = Resource::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Resource not found".to_string()))?;

    let tags = Tag::names_for_resource(&state.db, resource.id).await?;

    Ok(Json(ResourceResponse {
        resource: ResourceJson::assemble(resource, tags),
    }))
}

/// Submit a new resource
///
/// The owner is always the authenticated identity regardless of anything in
/// the request body.
///
/// # Endpoint
///
/// ```text
/// POST /resources
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "The Rust Book",
///   "url": "doc.rust-lang.org/book/",
///   "tags": ["rust", "book"]
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid bearer token
/// - `422 Unprocessable Entity`: Field validation failed or the url does not
///   satisfy the URL grammar after normalization
pub async fn create_resource(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ResourcePayload>,
) -> ApiResult<(StatusCode, Json<ResourceResponse>)> {
    let checked = check_payload(&state, &req).await?;

    let resource = Resource::create(
        &state.db,
        CreateResource {
            user_id: auth.user_id,
            title: req.title.clone(),
            url: checked.url,
            description: req.description.clone(),
            license_id: checked.license_id,
            resource_category_id: checked.resource_category_id,
        },
    )
    .await?;

    let tags = apply_tags(&state, resource.id, &req.tags).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResourceResponse {
            resource: ResourceJson::assemble(resource, tags),
        }),
    ))
}

/// Replace a resource
///
/// Replaces every mutable field and the tag set (clear-then-reapply); the
/// owner never changes.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid bearer token
/// - `403 Forbidden`: Authenticated user does not own the resource
/// - `404 Not Found`: No resource with this id
/// - `422 Unprocessable Entity`: Field validation failed or invalid url
pub async fn update_resource(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResourcePayload>,
) -> ApiResult<Json<ResourceResponse>> {
    let existing = Resource::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Resource not found".to_string()))?;

    ownership::authorize(&auth, existing.user_id, ResourceAction::Update)?;

    let checked = check_payload(&state, &req).await?;

    let updated = Resource::update(
        &state.db,
        id,
        UpdateResource {
            title: req.title.clone(),
            url: checked.url,
            description: req.description.clone(),
            license_id: checked.license_id,
            resource_category_id: checked.resource_category_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Resource not found".to_string()))?;

    let tags = apply_tags(&state, updated.id, &req.tags).await?;

    Ok(Json(ResourceResponse {
        resource: ResourceJson::assemble(updated, tags),
    }))
}

/// Remove a resource
///
/// Tag associations are dropped with the resource; tag rows themselves are
/// never deleted.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid bearer token
/// - `403 Forbidden`: Authenticated user does not own the resource
/// - `404 Not Found`: No resource with this id
pub async fn delete_resource(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let existing = Resource::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Resource not found".to_string()))?;

    ownership::authorize(&auth, existing.user_id, ResourceAction::Destroy)?;

    Resource::delete(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_resource() -> Resource {
        Resource {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "One".to_string(),
            url: "http://example.com".to_string(),
            description: None,
            license_id: None,
            resource_category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_assemble_links() {
        let resource = sample_resource();
        let id = resource.id;

        let json = ResourceJson::assemble(resource, vec!["ruby".to_string()]);

        assert_eq!(json.links.len(), 2);
        assert_eq!(json.links[0].rel, "self");
        assert_eq!(json.links[0].href, format!("/resources/{}", id));
        assert_eq!(json.links[1].rel, "resources");
        assert_eq!(json.links[1].href, "/resources/");
        assert_eq!(json.tags, vec!["ruby".to_string()]);
    }

    #[test]
    fn test_build_filter_normalizes_tagged() {
        let params = ListResourcesParams {
            tagged: Some("Ruby".to_string()),
            ..Default::default()
        };

        let filter = build_filter(&params);
        assert_eq!(filter.tagged.as_deref(), Some("ruby"));
    }

    #[test]
    fn test_build_filter_drops_empty_parameters() {
        let params = ListResourcesParams {
            tagged: Some("  ".to_string()),
            search: Some(String::new()),
            ..Default::default()
        };

        let filter = build_filter(&params);
        assert_eq!(filter, ResourceFilter::default());
    }

    #[test]
    fn test_build_filter_passes_search_through() {
        let params = ListResourcesParams {
            search: Some("One".to_string()),
            license: Some(Uuid::nil()),
            ..Default::default()
        };

        let filter = build_filter(&params);
        assert_eq!(filter.search.as_deref(), Some("One"));
        assert_eq!(filter.license, Some(Uuid::nil()));
    }

    #[test]
    fn test_payload_validation_reports_fields() {
        let payload = ResourcePayload {
            title: String::new(),
            url: String::new(),
            description: None,
            tags: vec![],
            license_id: None,
            resource_category_id: None,
        };

        let details = validation_details(payload.validate().unwrap_err());
        let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"url"));
    }
}
