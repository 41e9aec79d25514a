//! Placeholder view handlers.
//!
//! The real ERP pages (data grids, forms) live in the front-end client and
//! are external collaborators; these handlers return the view descriptor the
//! shell renders for each gated navigation target.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PageView {
    pub section: &'static str,
    pub title: &'static str,
}

fn view(section: &'static str, title: &'static str) -> Json<PageView> {
    Json(PageView { section, title })
}

/// Shown while session resolution is pending; never reached through the
/// HTTP provider, which always resolves before the gate runs.
pub fn loading() -> Json<PageView> {
    view("loading", "Loading")
}

pub async fn dashboard() -> Json<PageView> {
    view("dashboard", "Dashboard")
}

pub async fn login() -> Json<PageView> {
    view("auth.login", "Sign in")
}

pub async fn unauthorized() -> Json<PageView> {
    view("auth.unauthorized", "Access denied")
}

pub async fn inventory() -> Json<PageView> {
    view("inventory.products", "Products")
}

pub async fn purchasing_orders() -> Json<PageView> {
    view("purchasing.orders", "Purchase orders")
}

pub async fn purchasing_bills() -> Json<PageView> {
    view("purchasing.bills", "Supplier bills")
}

pub async fn suppliers() -> Json<PageView> {
    view("suppliers.list", "Suppliers")
}

pub async fn sales_orders() -> Json<PageView> {
    view("sales.orders", "Sales orders")
}

pub async fn sales_customers() -> Json<PageView> {
    view("sales.customers", "Customers")
}

pub async fn admin_home() -> Json<PageView> {
    view("admin.home", "Administration")
}

pub async fn admin_users() -> Json<PageView> {
    view("admin.users", "User administration")
}
