//! Process-wide UI state. Read-only outside the reducer.

use crate::domain::{AiMessage, DashboardData, Memory, Reminder, SubscriptionTier, UserProfile};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AiAssistantState {
    pub is_active: bool,
    pub messages: Vec<AiMessage>,
}

/// Everything a view may render. `Default` is the fresh start-up shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub user: Option<UserProfile>,
    /// True iff `user` is set; maintained by LOGIN_SUCCESS and LOGOUT.
    pub is_authenticated: bool,
    pub memories: Vec<Memory>,
    pub reminders: Vec<Reminder>,
    pub subscription: SubscriptionTier,
    pub is_loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub ai_assistant: AiAssistantState,
    pub dashboard: DashboardData,
}

impl AppState {
    pub fn is_premium(&self) -> bool {
        self.subscription == SubscriptionTier::Premium
    }
}
