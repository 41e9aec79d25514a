use crate::authz::{permissions, roles};

/// Navigation zone a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteZone {
    /// Pre-authentication surface (login). Authenticated users are bounced
    /// to the default landing route instead.
    Public,
    /// Requires a valid session.
    Private,
}

/// One static route declaration.
///
/// `required_roles` / `required_permissions` distinguish "no restriction"
/// (`None`) from "super-role only" (`Some` with an empty list). Declarations
/// never change after the table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDeclaration {
    pub pattern: &'static str,
    pub zone: RouteZone,
    pub required_roles: Option<Vec<String>>,
    pub required_permissions: Option<Vec<String>>,
    /// View identifier handed back to the rendering layer.
    pub view: &'static str,
}

impl RouteDeclaration {
    pub fn public(pattern: &'static str, view: &'static str) -> Self {
        Self {
            pattern,
            zone: RouteZone::Public,
            required_roles: None,
            required_permissions: None,
            view,
        }
    }

    pub fn private(pattern: &'static str, view: &'static str) -> Self {
        Self {
            pattern,
            zone: RouteZone::Private,
            required_roles: None,
            required_permissions: None,
            view,
        }
    }

    pub fn require_roles(mut self, roles: &[&str]) -> Self {
        self.required_roles = Some(roles.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn require_permissions(mut self, perms: &[&str]) -> Self {
        self.required_permissions = Some(perms.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Whether `path` is this pattern or a descendant of it.
    ///
    /// The root pattern matches only itself; everything would otherwise nest
    /// under the dashboard.
    fn matches(&self, path: &str) -> bool {
        if self.pattern == "/" {
            return path == "/";
        }
        path == self.pattern || path.starts_with(&format!("{}/", self.pattern))
    }
}

/// The outer->inner chain of declarations matching one requested path.
///
/// Restrictions stack: the gate checks every declaration in the chain, so a
/// route nested under a restricted section carries the section's requirement
/// plus its own. The innermost declaration names the rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub path: String,
    pub chain: Vec<&'a RouteDeclaration>,
}

impl RouteMatch<'_> {
    pub fn innermost(&self) -> &RouteDeclaration {
        self.chain.last().expect("route match always has at least one declaration")
    }

    pub fn is_private(&self) -> bool {
        self.chain.iter().any(|decl| decl.zone == RouteZone::Private)
    }
}

/// Static, ordered navigation table. Declared once at startup, never mutated.
#[derive(Debug)]
pub struct RouteTable {
    declarations: Vec<RouteDeclaration>,
}

impl RouteTable {
    pub fn new(declarations: Vec<RouteDeclaration>) -> Self {
        Self { declarations }
    }

    /// The ERP admin navigation surface.
    pub fn standard() -> Self {
        use permissions::*;

        Self::new(vec![
            RouteDeclaration::public("/login", "auth.login"),
            RouteDeclaration::private("/unauthorized", "auth.unauthorized"),
            RouteDeclaration::private("/", "dashboard"),
            RouteDeclaration::private("/inventory", "inventory.products")
                .require_permissions(&[INVENTORY_VIEW_PRODUCTS]),
            RouteDeclaration::private("/purchasing", "purchasing.orders")
                .require_permissions(&[PURCHASING_VIEW_ORDERS]),
            RouteDeclaration::private("/purchasing/bills", "purchasing.bills")
                .require_permissions(&[PURCHASING_VIEW_BILLS]),
            RouteDeclaration::private("/suppliers", "suppliers.list")
                .require_permissions(&[SUPPLIERS_VIEW]),
            RouteDeclaration::private("/sales", "sales.orders")
                .require_permissions(&[SALES_VIEW_ORDERS]),
            RouteDeclaration::private("/sales/customers", "sales.customers")
                .require_permissions(&[SALES_VIEW_CUSTOMERS]),
            RouteDeclaration::private("/admin", "admin.home")
                .require_roles(&[roles::ADMIN]),
            RouteDeclaration::private("/admin/users", "admin.users")
                .require_roles(&[roles::ADMIN])
                .require_permissions(&[USERS_VIEW]),
        ])
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn declarations(&self) -> &[RouteDeclaration] {
        &self.declarations
    }

    /// Match a request path against the table.
    ///
    /// Returns every matching declaration ordered outer->inner, or `None` for
    /// paths the table does not know (the caller falls through to 404).
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = normalize(path);

        let mut chain: Vec<&RouteDeclaration> = self
            .declarations
            .iter()
            .filter(|decl| decl.matches(&path))
            .collect();
        if chain.is_empty() {
            return None;
        }
        chain.sort_by_key(|decl| decl.pattern.len());

        Some(RouteMatch { path, chain })
    }
}

/// Strip the query string and any trailing slash.
fn normalize(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/').to_string()
    } else {
        path.to_string()
    }
}
