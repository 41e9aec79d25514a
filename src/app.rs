use std::sync::Arc;

use axum::http::Method;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::authz::PolicyMap;
use crate::errors::AppError;
use crate::gate::{self, RouteTable};
use crate::jwt::JwtConfig;
use crate::routes::{authz, health, pages};
use crate::session::{JwtSessionProvider, SessionProvider};

#[derive(Clone)]
pub struct AppState {
    pub policy: &'static PolicyMap,
    pub routes: Arc<RouteTable>,
    pub jwt: Arc<JwtConfig>,
    pub sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(jwt: JwtConfig) -> Self {
        let jwt = Arc::new(jwt);
        Self {
            policy: PolicyMap::standard(),
            routes: Arc::new(RouteTable::standard()),
            jwt: jwt.clone(),
            sessions: Arc::new(JwtSessionProvider::new(jwt)),
        }
    }
}

pub async fn create_app() -> Result<Router, AppError> {
    let jwt_config = JwtConfig::from_env()?;
    let state = AppState::new(jwt_config);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    // Every navigable path passes through the gate middleware; the handlers
    // themselves are placeholder views standing in for the real pages.
    let page_routes = Router::new()
        .route("/", get(pages::dashboard))
        .route("/login", get(pages::login))
        .route("/unauthorized", get(pages::unauthorized))
        .route("/inventory", get(pages::inventory))
        .route("/inventory/*rest", get(pages::inventory))
        .route("/purchasing", get(pages::purchasing_orders))
        .route("/purchasing/bills", get(pages::purchasing_bills))
        .route("/suppliers", get(pages::suppliers))
        .route("/suppliers/*rest", get(pages::suppliers))
        .route("/sales", get(pages::sales_orders))
        .route("/sales/customers", get(pages::sales_customers))
        .route("/admin", get(pages::admin_home))
        .route("/admin/users", get(pages::admin_users))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::middleware::route_gate,
        ));

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/authz/roles", get(authz::list_roles))
        .route("/authz/permissions", get(authz::list_permissions))
        .route("/authz/me", get(authz::me))
        .route("/authz/check", get(authz::check));

    let router = Router::new()
        .merge(page_routes)
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
