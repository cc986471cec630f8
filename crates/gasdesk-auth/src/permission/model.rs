//! Typed permission identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use gasdesk_core::error::AppError;

/// Separator between resource and action in the wire format.
pub const SEPARATOR: char = ':';

/// A permission target such as `customer` or `gas_conversion`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(String);

impl Resource {
    /// Create a resource identifier. Rejects empty names and separators.
    pub fn new(name: impl Into<String>) -> Result<Self, AppError> {
        let name = name.into();
        if name.is_empty() || name.contains(SEPARATOR) {
            return Err(AppError::validation(format!(
                "Invalid permission resource '{name}'"
            )));
        }
        Ok(Self(name))
    }

    /// The resource name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What may be done to a resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// List and read.
    View,
    /// Create new records.
    Create,
    /// Modify records.
    Update,
    /// Remove records.
    Delete,
    /// Approve workflow steps (conversions, audits, returns).
    Approve,
    /// Export listings.
    Export,
    /// Every action on the resource.
    Manage,
    /// Any action the console does not name.
    Other(String),
}

impl Action {
    /// Wire spelling of the action.
    pub fn as_str(&self) -> &str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Approve => "approve",
            Action::Export => "export",
            Action::Manage => "manage",
            Action::Other(name) => name,
        }
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.contains(SEPARATOR) {
            return Err(AppError::validation(format!(
                "Invalid permission action '{s}'"
            )));
        }
        Ok(match s {
            "view" => Action::View,
            "create" => Action::Create,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "approve" => Action::Approve,
            "export" => Action::Export,
            "manage" => Action::Manage,
            other => Action::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `resource:action` permission.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permission {
    /// What the permission applies to.
    pub resource: Resource,
    /// What it allows.
    pub action: Action,
}

impl Permission {
    /// Build a permission from typed parts.
    pub fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// The `manage` permission for the same resource.
    pub fn manage_variant(&self) -> Permission {
        Permission::new(self.resource.clone(), Action::Manage)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    /// Parses `"<resource>:<action>"`; exactly one separator is allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s.split_once(SEPARATOR).ok_or_else(|| {
            AppError::validation(format!("Permission '{s}' is missing ':'"))
        })?;
        Ok(Self {
            resource: Resource::new(resource)?,
            action: action.parse()?,
        })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.resource, self.action)
    }
}

impl Serialize for Permission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
