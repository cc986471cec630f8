//! Permission evaluation against the resolved user.

use tracing::warn;

use crate::state::AuthorizedUser;

use super::model::{Permission, Resource, SEPARATOR};

/// Decides whether the current user holds a permission.
///
/// Checks run in a fixed order: an absent requirement passes, an absent
/// user or permission list fails, the super-admin role passes, then the
/// exact permission, then the resource's `manage` grant.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    /// Role name granted everything.
    super_admin_role: String,
}

impl PermissionEvaluator {
    /// Create an evaluator with the given super-admin role name.
    pub fn new(super_admin_role: impl Into<String>) -> Self {
        Self {
            super_admin_role: super_admin_role.into(),
        }
    }

    /// The sentinel role name.
    pub fn super_admin_role(&self) -> &str {
        &self.super_admin_role
    }

    /// Evaluate a wire-format requirement such as `"customer:view"`.
    ///
    /// `None` or an empty string is an ungated view. A requirement that is not a valid
    /// `resource:action` pair can never match exactly; it is granted only
    /// through the super-admin role or a `manage` grant on the text before
    /// its first colon.
    pub fn check_permission(&self, user: Option<&AuthorizedUser>, required: Option<&str>) -> bool {
        let Some(required) = required.filter(|r| !r.is_empty()) else {
            return true;
        };
        match required.parse::<Permission>() {
            Ok(permission) => self.check(user, &permission),
            Err(e) => {
                warn!(permission = required, error = %e, "Malformed permission requirement");
                self.check_malformed(user, required)
            }
        }
    }

    /// Evaluate a typed requirement.
    pub fn check(&self, user: Option<&AuthorizedUser>, required: &Permission) -> bool {
        let Some(user) = user else {
            return false;
        };
        let Some(permissions) = user.permissions() else {
            return false;
        };
        if user.role_name() == self.super_admin_role {
            return true;
        }
        permissions.contains(required) || permissions.manages(&required.resource)
    }

    fn check_malformed(&self, user: Option<&AuthorizedUser>, required: &str) -> bool {
        let Some(user) = user else {
            return false;
        };
        let Some(permissions) = user.permissions() else {
            return false;
        };
        if user.role_name() == self.super_admin_role {
            return true;
        }
        let prefix = required.split(SEPARATOR).next().unwrap_or_default();
        Resource::new(prefix)
            .map(|resource| permissions.manages(&resource))
            .unwrap_or(false)
    }
}

impl Default for PermissionEvaluator {
    fn default() -> Self {
        Self::new("Super Admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasdesk_core::types::{PermissionRecord, Role, User};

    fn user(role_name: &str, permissions: Option<&[&str]>) -> AuthorizedUser {
        AuthorizedUser::from_user(User {
            id: 1,
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            role: Role {
                id: 9,
                role_name: role_name.to_string(),
                permissions: permissions
                    .map(|names| names.iter().map(|n| PermissionRecord::new(*n)).collect()),
            },
        })
    }

    const REQUIREMENTS: &[&str] = &[
        "customer:view",
        "customer:delete",
        "product:manage",
        "gas_conversion:approve",
        "warehouse:refill",
    ];

    #[test]
    fn test_super_admin_passes_everything_with_empty_list() {
        let evaluator = PermissionEvaluator::default();
        let admin = user("Super Admin", Some(&[]));
        for required in REQUIREMENTS {
            assert!(evaluator.check_permission(Some(&admin), Some(required)));
        }
    }

    #[test]
    fn test_super_admin_without_list_is_denied() {
        let evaluator = PermissionEvaluator::default();
        let admin = user("Super Admin", None);
        assert!(!evaluator.check_permission(Some(&admin), Some("customer:view")));
    }

    #[test]
    fn test_manage_grants_every_action_on_resource() {
        let evaluator = PermissionEvaluator::default();
        let manager = user("Warehouse Lead", Some(&["warehouse:manage"]));
        for action in ["view", "create", "update", "delete", "refill"] {
            let required = format!("warehouse:{action}");
            assert!(evaluator.check_permission(Some(&manager), Some(&required)));
        }
        assert!(!evaluator.check_permission(Some(&manager), Some("customer:view")));
    }

    #[test]
    fn test_exact_match_and_denial() {
        let evaluator = PermissionEvaluator::default();
        let sales = user("Sales", Some(&["customer:view"]));
        assert!(evaluator.check_permission(Some(&sales), Some("customer:view")));
        assert!(!evaluator.check_permission(Some(&sales), Some("customer:delete")));
        assert!(!evaluator.check_permission(Some(&sales), Some("customer:manage")));
    }

    #[test]
    fn test_ungated_always_passes() {
        let evaluator = PermissionEvaluator::default();
        assert!(evaluator.check_permission(None, None));
        let sales = user("Sales", None);
        assert!(evaluator.check_permission(Some(&sales), None));
    }

    #[test]
    fn test_empty_requirement_is_ungated() {
        let evaluator = PermissionEvaluator::default();
        let sales = user("Sales", Some(&["customer:view"]));
        let bare = user("Sales", None);
        assert!(evaluator.check_permission(None, Some("")));
        assert!(evaluator.check_permission(Some(&sales), Some("")));
        assert!(evaluator.check_permission(Some(&bare), Some("")));
    }

    #[test]
    fn test_no_user_fails_every_requirement() {
        let evaluator = PermissionEvaluator::default();
        for required in REQUIREMENTS {
            assert!(!evaluator.check_permission(None, Some(required)));
        }
    }

    #[test]
    fn test_malformed_requirement() {
        let evaluator = PermissionEvaluator::default();
        let viewer = user("Sales", Some(&["customer:view"]));
        assert!(!evaluator.check_permission(Some(&viewer), Some("customer")));
        assert!(!evaluator.check_permission(Some(&viewer), Some("customer:view:all")));

        let manager = user("Sales Lead", Some(&["customer:manage"]));
        assert!(evaluator.check_permission(Some(&manager), Some("customer:view:all")));
        assert!(!evaluator.check_permission(None, Some("customer")));

        let admin = user("Super Admin", Some(&[]));
        assert!(evaluator.check_permission(Some(&admin), Some("customer")));
    }

    #[test]
    fn test_custom_sentinel_name() {
        let evaluator = PermissionEvaluator::new("Owner");
        let owner = user("Owner", Some(&[]));
        let admin = user("Super Admin", Some(&[]));
        assert!(evaluator.check_permission(Some(&owner), Some("order:delete")));
        assert!(!evaluator.check_permission(Some(&admin), Some("order:delete")));
    }
}
