//! Endpoint paths of the backend REST API.

/// Exchange credentials for a token.
pub const LOGIN: &str = "/auth/login";

/// The authenticated user and role.
pub const ME: &str = "/auth/me";
