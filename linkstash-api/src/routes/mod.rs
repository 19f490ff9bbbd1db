/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `resources`: Catalog listing, lookup, and owner-scoped mutation

pub mod health;
pub mod resources;
