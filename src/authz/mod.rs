//! Authorization model - catalogs and policy map
//!
//! This module implements the declarative RBAC core:
//! - Closed role and permission catalogs (identifiers declared once,
//!   referenced symbolically everywhere else)
//! - An immutable role->permission map assembled at process start
//! - Pure `has_permission` / `has_any_role` checks with a super-role bypass

mod policy;

pub use policy::{has_any_role, has_permission, PolicyMap};

/// Well-known role names
pub mod roles {
    /// Distinguished super-role: bypasses every permission check.
    pub const SUPER_ADMIN: &str = "superadmin";
    pub const ADMIN: &str = "admin";
    pub const MANAGER: &str = "manager";
    pub const ACCOUNTANT: &str = "accountant";
    pub const SALES: &str = "sales";
    pub const WAREHOUSE: &str = "warehouse";

    /// Every declared role, super-role included.
    pub const ALL: &[&str] = &[SUPER_ADMIN, ADMIN, MANAGER, ACCOUNTANT, SALES, WAREHOUSE];
}

/// Well-known permission names
pub mod permissions {
    // Inventory
    pub const INVENTORY_VIEW_PRODUCTS: &str = "inventory.view_products";
    pub const INVENTORY_CREATE_PRODUCT: &str = "inventory.create_product";
    pub const INVENTORY_UPDATE_PRODUCT: &str = "inventory.update_product";
    pub const INVENTORY_DELETE_PRODUCT: &str = "inventory.delete_product";

    // Purchasing
    pub const PURCHASING_VIEW_ORDERS: &str = "purchasing.view_orders";
    pub const PURCHASING_CREATE_ORDER: &str = "purchasing.create_order";
    pub const PURCHASING_VIEW_BILLS: &str = "purchasing.view_bills";
    pub const PURCHASING_CREATE_BILL: &str = "purchasing.create_bill";

    // Suppliers
    pub const SUPPLIERS_VIEW: &str = "suppliers.view";
    pub const SUPPLIERS_MANAGE: &str = "suppliers.manage";

    // Sales
    pub const SALES_VIEW_ORDERS: &str = "sales.view_orders";
    pub const SALES_CREATE_ORDER: &str = "sales.create_order";
    pub const SALES_VIEW_CUSTOMERS: &str = "sales.view_customers";
    pub const SALES_MANAGE_CUSTOMERS: &str = "sales.manage_customers";

    // User administration
    pub const USERS_VIEW: &str = "users.view";
    pub const USERS_MANAGE: &str = "users.manage";

    // Reporting
    pub const REPORTS_VIEW: &str = "reports.view";

    /// Every declared permission.
    pub const ALL: &[&str] = &[
        INVENTORY_VIEW_PRODUCTS,
        INVENTORY_CREATE_PRODUCT,
        INVENTORY_UPDATE_PRODUCT,
        INVENTORY_DELETE_PRODUCT,
        PURCHASING_VIEW_ORDERS,
        PURCHASING_CREATE_ORDER,
        PURCHASING_VIEW_BILLS,
        PURCHASING_CREATE_BILL,
        SUPPLIERS_VIEW,
        SUPPLIERS_MANAGE,
        SALES_VIEW_ORDERS,
        SALES_CREATE_ORDER,
        SALES_VIEW_CUSTOMERS,
        SALES_MANAGE_CUSTOMERS,
        USERS_VIEW,
        USERS_MANAGE,
        REPORTS_VIEW,
    ];
}
