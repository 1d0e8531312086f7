//! Route table and the guard that gates protected routes.

pub mod guard;
pub mod routes;

pub use guard::{GuardDecision, RouteGuard};
pub use routes::Route;
