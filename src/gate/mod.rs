//! Route gate - render/redirect decisions per navigation.
//!
//! The gate is a pure state machine over three inputs: the policy map, a
//! tri-state session snapshot, and the matched route chain. It performs no
//! I/O and holds no state of its own; identical inputs always produce the
//! identical outcome. Authorization denial is a redirect, never an error.

pub mod middleware;
mod table;

pub use table::{RouteDeclaration, RouteMatch, RouteTable, RouteZone};

use crate::authz::{has_any_role, PolicyMap};
use crate::session::SessionSnapshot;

/// Route the login flow lives at.
pub const LOGIN_PATH: &str = "/login";
/// Route shown to authenticated users lacking a required role/permission.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
/// Default landing route for authenticated users.
pub const DEFAULT_LANDING_PATH: &str = "/";

/// Declarative navigation side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectCommand {
    pub to: &'static str,
    /// Replace the current history entry instead of pushing a new one, so a
    /// bounced navigation leaves no trace to go "back" to.
    pub replace: bool,
    /// Originally requested path, preserved so the login flow can return the
    /// user there after authenticating.
    pub return_path: Option<String>,
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Session resolution is still pending: show the loading placeholder,
    /// never redirect, never render the requested view.
    Loading,
    /// Render the named view.
    Render(&'static str),
    Redirect(RedirectCommand),
}

/// Evaluate the gate for one navigation.
///
/// Re-run on every navigation and every session-state change; the outcome is
/// terminal per render, recovery only happens through a new navigation or
/// the session provider resolving.
pub fn evaluate(policy: &PolicyMap, session: &SessionSnapshot, matched: &RouteMatch<'_>) -> GateOutcome {
    match session {
        // Never redirect before the session provider reaches a terminal
        // state; inferring "anonymous" from an unresolved session is the
        // classic race that bounces a logged-in user to login on a fresh
        // page load.
        SessionSnapshot::Resolving => GateOutcome::Loading,
        SessionSnapshot::Anonymous => {
            if matched.is_private() {
                tracing::debug!(path = %matched.path, "anonymous navigation to private route");
                GateOutcome::Redirect(RedirectCommand {
                    to: LOGIN_PATH,
                    replace: true,
                    return_path: Some(matched.path.clone()),
                })
            } else {
                GateOutcome::Render(matched.innermost().view)
            }
        }
        SessionSnapshot::Authenticated { role, .. } => {
            // A logged-in user has no business on the pre-auth surface.
            if matched.innermost().zone == RouteZone::Public {
                return GateOutcome::Redirect(RedirectCommand {
                    to: DEFAULT_LANDING_PATH,
                    replace: true,
                    return_path: None,
                });
            }

            // Restrictions stack across the chain; denial at any level wins
            // and the denied view is never rendered, not even partially.
            for decl in &matched.chain {
                if !declaration_allows(policy, role, decl) {
                    tracing::debug!(
                        path = %matched.path,
                        pattern = %decl.pattern,
                        role = %role,
                        "navigation denied"
                    );
                    return GateOutcome::Redirect(RedirectCommand {
                        to: UNAUTHORIZED_PATH,
                        replace: true,
                        return_path: None,
                    });
                }
            }

            GateOutcome::Render(matched.innermost().view)
        }
    }
}

fn declaration_allows(policy: &PolicyMap, role: &str, decl: &RouteDeclaration) -> bool {
    if let Some(allowed) = decl.required_roles.as_deref() {
        if !has_any_role(Some(role), Some(allowed)) {
            return false;
        }
    }
    if let Some(required) = decl.required_permissions.as_deref() {
        if !required.iter().all(|perm| policy.has_permission(Some(role), perm)) {
            return false;
        }
    }
    true
}
