/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and per-test cleanup
/// - Test user creation and bearer-token generation
/// - Request/response helpers for driving the router directly

use axum::body::Body;
use axum::http::Request;
use linkstash_api::app::{build_router, AppState};
use linkstash_api::config::Config;
use linkstash_shared::auth::jwt::{create_token, Claims};
use linkstash_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context against an empty catalog
    ///
    /// Truncates every catalog table, so the suite must run with
    /// `--test-threads=1`.
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration (DATABASE_URL, JWT_SECRET)
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        // Start from an empty catalog
        sqlx::query(
            "TRUNCATE resources_tags, resources, tags, licenses, resource_categories, users CASCADE",
        )
        .execute(&db)
        .await?;

        // Create the authenticated test user
        let user = create_user(&db).await?;

        // Generate a bearer token for it
        let jwt_token = create_token(&Claims::new(user.id), &config.jwt.secret)?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns the authorization header value for the context's user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Returns an authorization header value for another user
    pub fn auth_header_for(&self, user: &User) -> anyhow::Result<String> {
        let token = create_token(&Claims::new(user.id), &self.config.jwt.secret)?;
        Ok(format!("Bearer {}", token))
    }
}

/// Creates a user with a unique email
pub async fn create_user(db: &PgPool) -> anyhow::Result<User> {
    let user = User::create(
        db,
        CreateUser {
            email: format!("test-{}@example.com", Uuid::new_v4()),
        },
    )
    .await?;

    Ok(user)
}

/// Builds an authenticated JSON request
pub fn json_request(
    method: &str,
    uri: &str,
    auth_header: &str,
    body: &serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth_header)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds an authenticated request without a body
pub fn bare_request(method: &str, uri: &str, auth_header: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth_header)
        .body(Body::empty())
        .unwrap()
}

/// Reads a response body as JSON
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// A minimal valid resource payload
pub fn resource_payload(title: &str, url: &str, tags: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "url": url,
        "description": "created by the integration suite",
        "tags": tags,
    })
}
