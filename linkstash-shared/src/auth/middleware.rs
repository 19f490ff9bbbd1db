/// Bearer-token authentication primitives
///
/// The HTTP layer resolves the `Authorization: Bearer <token>` header into an
/// [`AuthContext`] before any core logic runs; handlers extract it with
/// Axum's `Extension` extractor. A missing, malformed, or invalid credential
/// is rejected with 401, including non-Bearer schemes such as `Basic`.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use linkstash_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;

/// Authenticated identity added to request extensions
///
/// Every core operation that needs an identity takes this explicitly; there
/// is no ambient "current user" state anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

/// Error type for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header is not a Bearer credential
    #[error("Expected Bearer token")]
    InvalidFormat,

    /// Token validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Every authentication failure is 401, malformed headers included.
        (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value
///
/// # Errors
///
/// Returns `AuthError::InvalidFormat` for any other scheme.
pub fn extract_bearer(header_value: &str) -> Result<&str, AuthError> {
    header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt;

    #[test]
    fn test_auth_context_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = jwt::Claims::new(user_id);

        let context = AuthContext::from_claims(&claims);
        assert_eq!(context.user_id, user_id);
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_bearer_rejects_other_schemes() {
        assert!(matches!(
            extract_bearer("Basic dXNlcjpwYXNz"),
            Err(AuthError::InvalidFormat)
        ));
        assert!(matches!(extract_bearer("abc.def.ghi"), Err(AuthError::InvalidFormat)));
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        for err in [
            AuthError::MissingCredentials,
            AuthError::InvalidFormat,
            AuthError::InvalidToken("expired".to_string()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
