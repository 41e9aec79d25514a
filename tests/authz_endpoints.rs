use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::util::ServiceExt;
use uuid::Uuid;

use erp_gate::authz::{permissions, roles};
use erp_gate::create_app;
use erp_gate::jwt::JwtConfig;

const SECRET: &str = "authz-endpoints-test-secret";

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

async fn body_json(resp: Response) -> Result<Value> {
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_reports_route_table_size() -> Result<()> {
    let app = test_app().await?;

    let resp: Response = app.oneshot(get("/api/health", None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["status"], "ok");
    assert!(body["routes"].as_u64().unwrap_or(0) > 0);

    Ok(())
}

#[tokio::test]
async fn introspection_requires_a_session() -> Result<()> {
    let app = test_app().await?;

    for path in ["/api/authz/roles", "/api/authz/permissions", "/api/authz/me"] {
        let resp: Response = app.clone().oneshot(get(path, None)?).await?;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path} should 401");
    }

    Ok(())
}

#[tokio::test]
async fn me_lists_effective_permissions() -> Result<()> {
    let app = test_app().await?;
    let token = token_for(roles::ACCOUNTANT)?;

    let resp: Response = app.oneshot(get("/api/authz/me", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await?;
    assert_eq!(body["role"], roles::ACCOUNTANT);
    let perms: Vec<&str> = body["permissions"]
        .as_array()
        .map(|list| list.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();
    assert!(perms.contains(&permissions::PURCHASING_CREATE_BILL));
    assert!(!perms.contains(&permissions::INVENTORY_DELETE_PRODUCT));

    Ok(())
}

#[tokio::test]
async fn check_evaluates_a_single_permission() -> Result<()> {
    let app = test_app().await?;
    let token = token_for(roles::ACCOUNTANT)?;

    let resp: Response = app
        .clone()
        .oneshot(get("/api/authz/check?permission=purchasing.create_bill", Some(&token))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?["granted"], true);

    let resp: Response = app
        .clone()
        .oneshot(get("/api/authz/check?permission=inventory.delete_product", Some(&token))?)
        .await?;
    assert_eq!(body_json(resp).await?["granted"], false);

    // Missing parameter is a client error, not a denial.
    let resp: Response = app.oneshot(get("/api/authz/check", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn roles_listing_covers_the_catalog() -> Result<()> {
    let app = test_app().await?;
    let token = token_for(roles::ADMIN)?;

    let resp: Response = app.oneshot(get("/api/authz/roles", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await?;
    let names: Vec<&str> = body
        .as_array()
        .map(|list| list.iter().filter_map(|v| v["name"].as_str()).collect())
        .unwrap_or_default();
    for role in roles::ALL {
        assert!(names.contains(role), "missing role {role}");
    }

    Ok(())
}
