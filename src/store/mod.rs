//! Application store: state, closed action protocol, pure reducer and the container.

pub mod action;
pub mod container;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use container::Store;
pub use reducer::reduce;
pub use state::{AiAssistantState, AppState};
