//! Session snapshot and resolution.
//!
//! The gate never reads ambient auth state: it receives an explicit,
//! read-only [`SessionSnapshot`] on every evaluation. `Resolving` exists for
//! embedders whose credential check is still in flight (e.g. a client shell
//! validating a persisted token); the HTTP layer here always awaits the
//! provider and hands the gate a terminal state.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;
use crate::errors::AppError;
use crate::jwt::JwtConfig;

/// Tri-state session snapshot consumed by the route gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSnapshot {
    /// Credential resolution still in flight; the gate must not redirect.
    Resolving,
    /// No valid session.
    Anonymous,
    /// Valid session with the role reported by the identity system.
    Authenticated { user_id: Uuid, role: String },
}

impl SessionSnapshot {
    pub fn role(&self) -> Option<&str> {
        match self {
            SessionSnapshot::Authenticated { role, .. } => Some(role),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionSnapshot::Resolving)
    }
}

/// Session resolution seam for pluggable auth backends.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve request headers into a session snapshot.
    ///
    /// Implementations backing the HTTP layer must return a terminal state:
    /// the gate is only allowed to redirect once resolution has completed.
    async fn resolve(&self, headers: &HeaderMap) -> SessionSnapshot;
}

/// Bearer-token provider verifying JWTs minted by the identity system.
#[derive(Clone)]
pub struct JwtSessionProvider {
    jwt: Arc<JwtConfig>,
}

impl JwtSessionProvider {
    pub fn new(jwt: Arc<JwtConfig>) -> Self {
        Self { jwt }
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn resolve(&self, headers: &HeaderMap) -> SessionSnapshot {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let Some(token) = token else {
            return SessionSnapshot::Anonymous;
        };

        match self.jwt.decode(token) {
            Ok(claims) => SessionSnapshot::Authenticated {
                user_id: claims.sub,
                role: claims.role,
            },
            Err(err) => {
                // Invalid or expired tokens resolve to anonymous, not to an
                // error: the gate will bounce the user through login.
                tracing::debug!(error = %err, "token rejected, resolving session as anonymous");
                SessionSnapshot::Anonymous
            }
        }
    }
}

/// Extractor for API handlers that require an authenticated session.
///
/// Page navigation goes through the gate middleware instead; this guards the
/// JSON surface, where "no session" is a 401 rather than a redirect.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub role: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match state.sessions.resolve(&parts.headers).await {
            SessionSnapshot::Authenticated { user_id, role } => Ok(CurrentUser { user_id, role }),
            _ => Err(AppError::unauthorized("valid session required")),
        }
    }
}
