use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

use erp_gate::authz::roles;
use erp_gate::create_app;
use erp_gate::jwt::JwtConfig;

const SECRET: &str = "gate-navigation-test-secret";

async fn test_app() -> Result<axum::Router> {
    std::env::set_var("JWT_SECRET", SECRET);
    Ok(create_app().await?)
}

fn token_for(role: &str) -> Result<String> {
    let jwt = JwtConfig::new(SECRET.as_bytes().to_vec(), 24);
    Ok(jwt.encode(Uuid::new_v4(), role)?)
}

fn get(path: &str, token: Option<&str>) -> Result<Request<Body>> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    Ok(builder.body(Body::empty())?)
}

fn location(resp: &Response) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

async fn body_json(resp: Response) -> Result<Value> {
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn anonymous_private_navigation_redirects_to_login_with_return() -> Result<()> {
    let app = test_app().await?;

    let resp: Response = app.oneshot(get("/admin/users", None)?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/login?return=%2Fadmin%2Fusers"));

    Ok(())
}

#[tokio::test]
async fn anonymous_sees_the_login_page() -> Result<()> {
    let app = test_app().await?;

    let resp: Response = app.oneshot(get("/login", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["section"], "auth.login");

    Ok(())
}

#[tokio::test]
async fn authenticated_user_on_login_page_is_sent_to_dashboard() -> Result<()> {
    let app = test_app().await?;
    let token = token_for(roles::SALES)?;

    let resp: Response = app.oneshot(get("/login", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));

    Ok(())
}

#[tokio::test]
async fn insufficient_role_is_redirected_to_unauthorized_not_login() -> Result<()> {
    let app = test_app().await?;
    let token = token_for(roles::WAREHOUSE)?;

    let resp: Response = app.oneshot(get("/admin/users", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/unauthorized"));

    Ok(())
}

#[tokio::test]
async fn admin_reaches_user_administration() -> Result<()> {
    let app = test_app().await?;

    for role in [roles::ADMIN, roles::SUPER_ADMIN] {
        let token = token_for(role)?;
        let resp: Response = app.clone().oneshot(get("/admin/users", Some(&token))?).await?;
        assert_eq!(resp.status(), StatusCode::OK, "role {role} should pass the gate");
        let body = body_json(resp).await?;
        assert_eq!(body["section"], "admin.users");
    }

    Ok(())
}

#[tokio::test]
async fn permission_gated_sections_follow_the_policy_map() -> Result<()> {
    let app = test_app().await?;

    // Accountant may see supplier bills but warehouse may not.
    let accountant = token_for(roles::ACCOUNTANT)?;
    let resp: Response = app.clone().oneshot(get("/purchasing/bills", Some(&accountant))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let warehouse = token_for(roles::WAREHOUSE)?;
    let resp: Response = app.clone().oneshot(get("/purchasing/bills", Some(&warehouse))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/unauthorized"));

    // Warehouse still sees the purchase orders it is granted.
    let resp: Response = app.oneshot(get("/purchasing", Some(&warehouse))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn expired_token_navigates_as_anonymous() -> Result<()> {
    let app = test_app().await?;
    let expired = JwtConfig::new(SECRET.as_bytes().to_vec(), -1).encode(Uuid::new_v4(), roles::ADMIN)?;

    let resp: Response = app.oneshot(get("/suppliers", Some(&expired))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/login?return=%2Fsuppliers"));

    Ok(())
}

#[tokio::test]
async fn unauthorized_view_is_reachable_by_any_authenticated_user() -> Result<()> {
    let app = test_app().await?;
    let token = token_for(roles::WAREHOUSE)?;

    let resp: Response = app.oneshot(get("/unauthorized", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["section"], "auth.unauthorized");

    Ok(())
}

#[tokio::test]
async fn unknown_paths_fall_through_to_404() -> Result<()> {
    let app = test_app().await?;

    let resp: Response = app.oneshot(get("/no-such-section", None)?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn descendant_paths_inherit_their_sections_gate() -> Result<()> {
    let app = test_app().await?;

    // Sales can browse product listings but not delete-level admin paths.
    let token = token_for(roles::SALES)?;
    let resp: Response = app.clone().oneshot(get("/inventory/products/42", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp: Response = app.oneshot(get("/admin/users", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/unauthorized"));

    Ok(())
}
