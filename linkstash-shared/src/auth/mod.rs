/// Authentication and authorization utilities
///
/// This module provides the identity plumbing for the catalog:
///
/// # Modules
///
/// - [`jwt`]: HS256 access-token generation and validation
/// - [`middleware`]: Bearer-header extraction and the `AuthContext` identity
/// - [`ownership`]: Owner-only mutation decisions
///
/// Credential issuance (registration, login) is an external collaborator;
/// this system only consumes a bearer token and turns it into an explicit
/// identity threaded through every core operation.

pub mod jwt;
pub mod middleware;
pub mod ownership;
