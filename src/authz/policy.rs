use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::{permissions, roles};

/// Immutable role->permission map.
///
/// Built once at process start; changing authorization policy means changing
/// the static table below and redeploying. A role present in the catalog but
/// absent from the map is valid and grants nothing (fail-closed). The
/// super-role never has an entry: it bypasses the map entirely.
#[derive(Debug)]
pub struct PolicyMap {
    grants: HashMap<&'static str, HashSet<&'static str>>,
}

impl PolicyMap {
    /// The standard ERP policy table.
    pub fn standard() -> &'static PolicyMap {
        static MAP: OnceLock<PolicyMap> = OnceLock::new();
        MAP.get_or_init(|| {
            use permissions::*;

            let mut builder = PolicyBuilder::default();

            builder.grant(roles::ADMIN, permissions::ALL);

            builder.grant(
                roles::MANAGER,
                &[
                    INVENTORY_VIEW_PRODUCTS,
                    INVENTORY_CREATE_PRODUCT,
                    INVENTORY_UPDATE_PRODUCT,
                    PURCHASING_VIEW_ORDERS,
                    PURCHASING_CREATE_ORDER,
                    PURCHASING_VIEW_BILLS,
                    SUPPLIERS_VIEW,
                    SUPPLIERS_MANAGE,
                    SALES_VIEW_ORDERS,
                    SALES_VIEW_CUSTOMERS,
                    USERS_VIEW,
                    REPORTS_VIEW,
                ],
            );

            builder.grant(
                roles::ACCOUNTANT,
                &[
                    PURCHASING_VIEW_ORDERS,
                    PURCHASING_VIEW_BILLS,
                    PURCHASING_CREATE_BILL,
                    SALES_VIEW_ORDERS,
                    REPORTS_VIEW,
                ],
            );

            builder.grant(
                roles::SALES,
                &[
                    SALES_VIEW_ORDERS,
                    SALES_CREATE_ORDER,
                    SALES_VIEW_CUSTOMERS,
                    SALES_MANAGE_CUSTOMERS,
                    INVENTORY_VIEW_PRODUCTS,
                ],
            );

            builder.grant(
                roles::WAREHOUSE,
                &[
                    INVENTORY_VIEW_PRODUCTS,
                    INVENTORY_UPDATE_PRODUCT,
                    PURCHASING_VIEW_ORDERS,
                ],
            );

            builder.build()
        })
    }

    /// Permissions granted to a role, empty for unknown roles and for roles
    /// with no entry. The super-role reports the full catalog.
    pub fn permissions_of(&self, role: &str) -> Vec<&'static str> {
        if role == roles::SUPER_ADMIN {
            return permissions::ALL.to_vec();
        }
        let mut perms: Vec<&'static str> = self
            .grants
            .get(role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        perms.sort_unstable();
        perms
    }

    /// Check whether `role` grants `permission`.
    ///
    /// Evaluation order:
    /// 1. super-role -> allow (deliberate escape hatch)
    /// 2. missing role -> deny (fail-closed)
    /// 3. set membership in the map, absent entry treated as empty
    pub fn has_permission(&self, role: Option<&str>, permission: &str) -> bool {
        let Some(role) = role else {
            tracing::debug!(permission = %permission, "denied: no role");
            return false;
        };

        if role == roles::SUPER_ADMIN {
            tracing::debug!(role = %role, permission = %permission, "super-role bypass");
            return true;
        }

        let granted = self
            .grants
            .get(role)
            .map(|set| set.contains(permission))
            .unwrap_or(false);

        tracing::debug!(role = %role, permission = %permission, granted, "permission check");
        granted
    }
}

#[derive(Default)]
struct PolicyBuilder {
    grants: HashMap<&'static str, HashSet<&'static str>>,
}

impl PolicyBuilder {
    fn grant(&mut self, role: &'static str, perms: &[&'static str]) {
        debug_assert!(roles::ALL.contains(&role), "undeclared role: {role}");
        debug_assert!(role != roles::SUPER_ADMIN, "super-role must not have an entry");
        let entry = self.grants.entry(role).or_default();
        for perm in perms {
            debug_assert!(permissions::ALL.contains(perm), "undeclared permission: {perm}");
            entry.insert(*perm);
        }
    }

    fn build(self) -> PolicyMap {
        PolicyMap { grants: self.grants }
    }
}

/// Check `permission` for `role` against the standard policy table.
///
/// Pure and deterministic; safe to call on every render or request.
pub fn has_permission(role: Option<&str>, permission: &str) -> bool {
    PolicyMap::standard().has_permission(role, permission)
}

/// Coarse-grained role gate used by route declarations.
///
/// The super-role always passes. A route with no restriction must declare
/// `None`, not an empty list: an empty list means "super-role only".
pub fn has_any_role(role: Option<&str>, allowed: Option<&[String]>) -> bool {
    let Some(role) = role else {
        return false;
    };
    if role == roles::SUPER_ADMIN {
        return true;
    }
    match allowed {
        Some(list) => list.iter().any(|allowed| allowed == role),
        None => false,
    }
}
