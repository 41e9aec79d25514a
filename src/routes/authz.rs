//! Read-only policy introspection.
//!
//! The front end consumes these to decide what to render (e.g. hide a
//! "create" button the role cannot use). Every decision goes through the
//! shared policy map; clients never re-implement membership tests.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz::{permissions, roles};
use crate::errors::{AppError, AppResult};
use crate::session::CurrentUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleInfo {
    pub name: &'static str,
    /// Granted permissions; the super-role reports the full catalog.
    pub permissions: Vec<&'static str>,
}

#[utoipa::path(
    get,
    path = "/api/authz/roles",
    tag = "Authz",
    responses(
        (status = 200, description = "Role catalog with granted permissions", body = Vec<RoleInfo>),
        (status = 401, description = "Valid session required")
    )
)]
pub async fn list_roles(State(state): State<AppState>, _user: CurrentUser) -> AppResult<Json<Vec<RoleInfo>>> {
    let catalog = roles::ALL
        .iter()
        .map(|role| RoleInfo {
            name: role,
            permissions: state.policy.permissions_of(role),
        })
        .collect();

    Ok(Json(catalog))
}

#[utoipa::path(
    get,
    path = "/api/authz/permissions",
    tag = "Authz",
    responses(
        (status = 200, description = "Permission catalog", body = Vec<String>),
        (status = 401, description = "Valid session required")
    )
)]
pub async fn list_permissions(_user: CurrentUser) -> AppResult<Json<Vec<&'static str>>> {
    Ok(Json(permissions::ALL.to_vec()))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EffectivePermissions {
    pub user_id: Uuid,
    pub role: String,
    pub permissions: Vec<&'static str>,
}

/// Effective permissions of the current session.
#[utoipa::path(
    get,
    path = "/api/authz/me",
    tag = "Authz",
    responses(
        (status = 200, description = "Effective permissions for the session", body = EffectivePermissions),
        (status = 401, description = "Valid session required")
    )
)]
pub async fn me(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<EffectivePermissions>> {
    let permissions = state.policy.permissions_of(&user.role);
    Ok(Json(EffectivePermissions {
        user_id: user.user_id,
        role: user.role,
        permissions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub permission: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckResponse {
    pub permission: String,
    pub granted: bool,
}

/// Evaluate one permission for the current session.
#[utoipa::path(
    get,
    path = "/api/authz/check",
    tag = "Authz",
    params(("permission" = String, Query, description = "Permission identifier to evaluate")),
    responses(
        (status = 200, description = "Decision for the requested permission", body = CheckResponse),
        (status = 400, description = "Missing permission parameter"),
        (status = 401, description = "Valid session required")
    )
)]
pub async fn check(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<CheckParams>,
) -> AppResult<Json<CheckResponse>> {
    let permission = params
        .permission
        .ok_or_else(|| AppError::bad_request("permission query parameter is required"))?;

    let granted = state.policy.has_permission(Some(&user.role), &permission);
    Ok(Json(CheckResponse { permission, granted }))
}
