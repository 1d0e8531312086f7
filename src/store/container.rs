//! The injected state container. Views hold an `Arc<Store>`, read snapshots, and dispatch.

use super::action::Action;
use super::reducer::reduce;
use super::state::AppState;
use crate::ports::SessionPort;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tracing::{debug, info};

/// Single source of UI state. Each dispatch runs the reducer to completion under the
/// channel's lock, so subscribers only ever observe whole transitions, in dispatch order.
pub struct Store {
    tx: watch::Sender<AppState>,
    session_checked: AtomicBool,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Start from a given state (tests, restored snapshots).
    pub fn with_state(state: AppState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            tx,
            session_checked: AtomicBool::new(false),
        }
    }

    pub fn dispatch(&self, action: Action) {
        let kind = action.kind();
        self.tx.send_modify(|state| {
            let prev = std::mem::take(state);
            *state = reduce(prev, action);
        });
        debug!(action = kind, "dispatched");
    }

    /// Owned snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.tx.borrow().clone()
    }

    /// Read a projection without cloning the whole state.
    pub fn select<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.tx.borrow())
    }

    /// Change feed. The receiver is marked changed after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }

    /// Start-up session check. Runs at most once per store; later calls only report the
    /// current flag. Any failure counts as "not authenticated".
    pub async fn check_session(&self, session: &dyn SessionPort) -> bool {
        if self.session_checked.swap(true, Ordering::SeqCst) {
            debug!("session already checked for this store");
            return self.select(|s| s.is_authenticated);
        }

        self.dispatch(Action::SetLoading(true));
        let authenticated = match session.current_user().await {
            Ok(user) => {
                info!(user_id = user.id, "restored session");
                self.dispatch(Action::LoginSuccess(user));
                true
            }
            Err(e) => {
                debug!(error = %e, "no authenticated user found");
                false
            }
        };
        self.dispatch(Action::SetLoading(false));
        authenticated
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
