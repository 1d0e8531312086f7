//! Route guard. Pure function of store state; performs no I/O.
//!
//! CHECKING -> AUTHORIZED | UNAUTHORIZED happens once, when the start-up session
//! check settles (see `Store::check_session`).

use super::routes::Route;
use crate::store::AppState;

/// Where a login resumes when no destination was carried.
pub const DEFAULT_AFTER_LOGIN: Route = Route::Dashboard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still in flight; show a spinner.
    Checking,
    Authorized,
    /// Send the user to `redirect_to`, remembering `from` for after login.
    Unauthorized { redirect_to: Route, from: Route },
}

pub struct RouteGuard;

impl RouteGuard {
    /// Decide what to render for `destination`. Public routes always pass.
    pub fn evaluate(state: &AppState, destination: Route) -> GuardDecision {
        if !destination.is_protected() {
            return GuardDecision::Authorized;
        }
        if state.is_loading && state.user.is_none() {
            return GuardDecision::Checking;
        }
        if state.is_authenticated {
            GuardDecision::Authorized
        } else {
            GuardDecision::Unauthorized {
                redirect_to: Route::Login,
                from: destination,
            }
        }
    }

    /// Destination after a successful login: the carried route when it was a real page.
    pub fn resume_after_login(from: Option<Route>) -> Route {
        match from {
            Some(route) if route != Route::Login && route != Route::NotFound => route,
            _ => DEFAULT_AFTER_LOGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserProfile;
    use crate::store::{reduce, Action};

    fn ada() -> UserProfile {
        serde_json::from_str(r#"{"id":1,"email":"ada@example.com"}"#).unwrap()
    }

    #[test]
    fn test_checking_while_session_check_runs() {
        let state = reduce(AppState::default(), Action::SetLoading(true));
        assert_eq!(
            RouteGuard::evaluate(&state, Route::Memories),
            GuardDecision::Checking
        );
    }

    #[test]
    fn test_unauthorized_carries_destination() {
        let state = AppState::default();
        assert_eq!(
            RouteGuard::evaluate(&state, Route::Reminders),
            GuardDecision::Unauthorized {
                redirect_to: Route::Login,
                from: Route::Reminders,
            }
        );
        assert_eq!(
            RouteGuard::resume_after_login(Some(Route::Reminders)),
            Route::Reminders
        );
    }

    #[test]
    fn test_authorized_after_login() {
        let state = reduce(AppState::default(), Action::LoginSuccess(ada()));
        assert_eq!(
            RouteGuard::evaluate(&state, Route::Dashboard),
            GuardDecision::Authorized
        );
    }

    #[test]
    fn test_loading_with_user_is_not_checking() {
        let state = reduce(
            reduce(AppState::default(), Action::LoginSuccess(ada())),
            Action::SetLoading(true),
        );
        assert_eq!(
            RouteGuard::evaluate(&state, Route::Memories),
            GuardDecision::Authorized
        );
    }

    #[test]
    fn test_public_routes_pass() {
        assert_eq!(
            RouteGuard::evaluate(&AppState::default(), Route::Login),
            GuardDecision::Authorized
        );
        assert_eq!(RouteGuard::resume_after_login(None), Route::Dashboard);
        assert_eq!(
            RouteGuard::resume_after_login(Some(Route::Login)),
            Route::Dashboard
        );
    }
}
