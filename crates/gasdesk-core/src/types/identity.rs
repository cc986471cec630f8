//! Identity payloads exchanged with the remote API.
//!
//! These mirror the wire format exactly. Permission names stay plain
//! strings here; `gasdesk-auth` parses them into typed grants.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The authenticated user as returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Remote identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Assigned role with its permission bundle.
    pub role: Role,
}

/// A named bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Remote identifier.
    pub id: i64,
    /// Role name, e.g. `"Sales"` or `"Super Admin"`.
    pub role_name: String,
    /// Permission records. `None` when the API omits the list entirely.
    #[serde(default)]
    pub permissions: Option<Vec<PermissionRecord>>,
}

/// A single `"<resource>:<action>"` permission as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// Colon-delimited permission name.
    pub name: String,
}

impl PermissionRecord {
    /// Build a record from a permission name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Login form / `POST /auth/login` request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    /// Account name.
    #[validate(length(min = 1, max = 128, message = "Username is required"))]
    pub username: String,
    /// Account password.
    #[validate(length(min = 1, max = 256, message = "Password is required"))]
    pub password: String,
}

/// Successful `POST /auth/login` response.
///
/// Only the token is interpreted; everything else the API sends is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token.
    pub token: String,
    /// Remaining response fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
