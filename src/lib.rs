pub mod app;
pub mod authz;
pub mod errors;
pub mod gate;
pub mod jwt;
pub mod routes;
pub mod session;

// Re-export commonly used items for tests and embedders
pub use app::create_app;
pub use authz::{has_any_role, has_permission};
