//! Login, register and logout flows. Delegates the round-trips to SessionPort and
//! reports outcomes through the store.

use crate::domain::validation::{LoginForm, RegisterForm};
use crate::domain::{DomainError, UserProfile};
use crate::ports::SessionPort;
use crate::store::{Action, Store};
use std::sync::Arc;
use tracing::{info, warn};

pub struct AuthService {
    session: Arc<dyn SessionPort>,
    store: Arc<Store>,
}

impl AuthService {
    pub fn new(session: Arc<dyn SessionPort>, store: Arc<Store>) -> Self {
        Self { session, store }
    }

    /// One-shot start-up check; see `Store::check_session`.
    pub async fn check_session(&self) -> bool {
        self.store.check_session(self.session.as_ref()).await
    }

    /// Submit the login form. Validation failures return early and leave the store alone.
    pub async fn login(&self, form: &LoginForm) -> Result<UserProfile, DomainError> {
        form.validate()?;
        self.store.dispatch(Action::ClearError);
        match self.session.login(form.email.trim(), &form.password).await {
            Ok(user) => {
                self.store.dispatch(Action::LoginSuccess(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.store.dispatch(Action::SetError(e.auth_message()));
                Err(e)
            }
        }
    }

    /// Submit the registration form. A new account is signed in straight away.
    pub async fn register(&self, form: &RegisterForm) -> Result<UserProfile, DomainError> {
        form.validate()?;
        self.store.dispatch(Action::ClearError);
        match self
            .session
            .register(form.email.trim(), &form.password, form.name.trim())
            .await
        {
            Ok(user) => {
                info!(user_id = user.id, "account created");
                self.store.dispatch(Action::LoginSuccess(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "registration failed");
                self.store.dispatch(Action::SetError(e.auth_message()));
                Err(e)
            }
        }
    }

    /// Local state is only reset once the server confirms the logout.
    pub async fn logout(&self) -> Result<(), DomainError> {
        match self.session.logout().await {
            Ok(()) => {
                self.store.dispatch(Action::Logout);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "logout failed");
                self.store.dispatch(Action::SetError(e.user_message()));
                Err(e)
            }
        }
    }

    /// Renew the session on demand and re-sync the cached profile.
    pub async fn refresh_session(&self) -> Result<UserProfile, DomainError> {
        match self.session.refresh_token().await {
            Ok(user) => {
                self.store.dispatch(Action::LoginSuccess(user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "session refresh failed");
                self.store.dispatch(Action::SetError(e.user_message()));
                Err(e)
            }
        }
    }
}
