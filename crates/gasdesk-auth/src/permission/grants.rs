//! Per-resource grant map built from a role's permission records.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use gasdesk_core::types::PermissionRecord;

use super::model::{Action, Permission, Resource};

/// Everything a role may do on one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceGrant {
    /// A `resource:manage` entry was present.
    pub manage: bool,
    /// Explicit action entries, `manage` excluded.
    pub actions: BTreeSet<Action>,
}

impl ResourceGrant {
    /// Exact entry for `action` (a `manage` request matches only `manage`).
    pub fn has_exact(&self, action: &Action) -> bool {
        match action {
            Action::Manage => self.manage,
            other => self.actions.contains(other),
        }
    }
}

/// Typed mapping from resources to their grants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    grants: BTreeMap<Resource, ResourceGrant>,
}

impl PermissionSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse wire records. Malformed names are logged and skipped.
    pub fn from_records(records: &[PermissionRecord]) -> Self {
        let mut set = Self::new();
        for record in records {
            match record.name.parse::<Permission>() {
                Ok(permission) => set.insert(permission),
                Err(e) => warn!(permission = %record.name, error = %e, "Ignoring malformed permission"),
            }
        }
        set
    }

    /// Add a permission.
    pub fn insert(&mut self, permission: Permission) {
        let grant = self.grants.entry(permission.resource).or_default();
        match permission.action {
            Action::Manage => grant.manage = true,
            other => {
                grant.actions.insert(other);
            }
        }
    }

    /// The grant for `resource`, if any.
    pub fn grant(&self, resource: &Resource) -> Option<&ResourceGrant> {
        self.grants.get(resource)
    }

    /// Whether the exact permission is present.
    pub fn contains(&self, permission: &Permission) -> bool {
        self.grant(&permission.resource)
            .map(|g| g.has_exact(&permission.action))
            .unwrap_or(false)
    }

    /// Whether `resource:manage` is present.
    pub fn manages(&self, resource: &Resource) -> bool {
        self.grant(resource).map(|g| g.manage).unwrap_or(false)
    }

    /// Number of distinct permissions held.
    pub fn len(&self) -> usize {
        self.grants
            .values()
            .map(|g| g.actions.len() + usize::from(g.manage))
            .sum()
    }

    /// Whether no permission is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All held permissions in resource order, `manage` first per resource.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.grants.iter().flat_map(|(resource, grant)| {
            let manage = grant
                .manage
                .then(|| Permission::new(resource.clone(), Action::Manage));
            manage.into_iter().chain(
                grant
                    .actions
                    .iter()
                    .map(move |a| Permission::new(resource.clone(), a.clone())),
            )
        })
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::new();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<PermissionRecord> {
        names.iter().map(|n| PermissionRecord::new(*n)).collect()
    }

    #[test]
    fn test_builds_grants_per_resource() {
        let set = PermissionSet::from_records(&records(&[
            "customer:view",
            "customer:update",
            "product:manage",
        ]));
        let customer = Resource::new("customer").unwrap();
        let product = Resource::new("product").unwrap();

        assert_eq!(set.len(), 3);
        assert!(set.contains(&"customer:view".parse().unwrap()));
        assert!(!set.contains(&"customer:delete".parse().unwrap()));
        assert!(!set.manages(&customer));
        assert!(set.manages(&product));
        assert!(set.contains(&"product:manage".parse().unwrap()));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let set = PermissionSet::from_records(&records(&["customer", "a:b:c", "order:view"]));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_lists_every_permission() {
        let set = PermissionSet::from_records(&records(&[
            "warehouse:view",
            "audit:approve",
            "warehouse:manage",
        ]));
        let names: Vec<String> = set.iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            vec!["audit:approve", "warehouse:manage", "warehouse:view"]
        );
    }
}
