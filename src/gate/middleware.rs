//! HTTP face of the gate: one middleware ahead of every page route.
//!
//! The middleware resolves the session to a terminal state, matches the
//! request path against the navigation table, and translates the gate's
//! declarative outcome into an HTTP effect: forward to the view handler,
//! 303 redirect, or the loading placeholder. It never calls the inner
//! handler for a denied navigation.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::app::AppState;
use crate::gate::{self, GateOutcome, RedirectCommand, LOGIN_PATH};
use crate::routes::pages;

pub async fn route_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(matched) = state.routes.match_path(req.uri().path()) else {
        // Unknown navigation path: not the gate's decision, fall through to
        // the router's 404.
        return next.run(req).await;
    };

    let session = state.sessions.resolve(req.headers()).await;

    match gate::evaluate(state.policy, &session, &matched) {
        GateOutcome::Render(_) => next.run(req).await,
        GateOutcome::Loading => pages::loading().into_response(),
        GateOutcome::Redirect(cmd) => Redirect::to(&location(&cmd)).into_response(),
    }
}

/// Render a redirect command as a Location target, attaching the preserved
/// return path to login redirects.
fn location(cmd: &RedirectCommand) -> String {
    match &cmd.return_path {
        Some(path) if cmd.to == LOGIN_PATH => {
            format!("{}?return={}", cmd.to, urlencoding::encode(path))
        }
        _ => cmd.to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_redirect_encodes_return_path() {
        let cmd = RedirectCommand {
            to: LOGIN_PATH,
            replace: true,
            return_path: Some("/admin/users".to_string()),
        };
        assert_eq!(location(&cmd), "/login?return=%2Fadmin%2Fusers");
    }

    #[test]
    fn unauthorized_redirect_carries_no_return_path() {
        let cmd = RedirectCommand {
            to: gate::UNAUTHORIZED_PATH,
            replace: true,
            return_path: None,
        };
        assert_eq!(location(&cmd), "/unauthorized");
    }
}
