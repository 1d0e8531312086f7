//! Closed action protocol. One variant per state transition.
//!
//! Wire form is `{"type": "SET_LOADING", "payload": true}`; tags the client does not
//! know decode to [`Action::Unknown`], which the reducer ignores.

use crate::domain::{AiMessage, DashboardData, Memory, Reminder, UserPatch, UserProfile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetLoading(bool),
    SetError(String),
    ClearError,
    SetSuccess(String),
    ClearSuccess,

    LoginSuccess(UserProfile),
    Logout,
    UpdateUser(UserPatch),

    SetMemories(Vec<Memory>),
    AddMemory(Memory),
    UpdateMemory(Memory),
    DeleteMemory(i64),

    SetReminders(Vec<Reminder>),
    AddReminder(Reminder),
    UpdateReminder(Reminder),
    DeleteReminder(i64),
    /// Carries the reminder with its status already flipped.
    ToggleReminderComplete(Reminder),

    SetDashboardData(DashboardData),

    ToggleAiAssistant,
    AddAiMessage(AiMessage),
    ClearAiMessages,

    /// Any tag this client does not know, with or without a payload.
    Unknown,
}

/// `{type, payload?}` before the tag is resolved.
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

fn payload<T: DeserializeOwned, E: serde::de::Error>(kind: &str, raw: Option<Value>) -> Result<T, E> {
    serde_json::from_value(raw.unwrap_or(Value::Null))
        .map_err(|e| E::custom(format!("{} payload: {}", kind, e)))
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawAction { kind, payload: raw } = RawAction::deserialize(deserializer)?;
        let k = kind.as_str();
        let action = match k {
            "SET_LOADING" => Action::SetLoading(payload(k, raw)?),
            "SET_ERROR" => Action::SetError(payload(k, raw)?),
            "CLEAR_ERROR" => Action::ClearError,
            "SET_SUCCESS" => Action::SetSuccess(payload(k, raw)?),
            "CLEAR_SUCCESS" => Action::ClearSuccess,
            "LOGIN_SUCCESS" => Action::LoginSuccess(payload(k, raw)?),
            "LOGOUT" => Action::Logout,
            "UPDATE_USER" => Action::UpdateUser(payload(k, raw)?),
            "SET_MEMORIES" => Action::SetMemories(payload(k, raw)?),
            "ADD_MEMORY" => Action::AddMemory(payload(k, raw)?),
            "UPDATE_MEMORY" => Action::UpdateMemory(payload(k, raw)?),
            "DELETE_MEMORY" => Action::DeleteMemory(payload(k, raw)?),
            "SET_REMINDERS" => Action::SetReminders(payload(k, raw)?),
            "ADD_REMINDER" => Action::AddReminder(payload(k, raw)?),
            "UPDATE_REMINDER" => Action::UpdateReminder(payload(k, raw)?),
            "DELETE_REMINDER" => Action::DeleteReminder(payload(k, raw)?),
            "TOGGLE_REMINDER_COMPLETE" => Action::ToggleReminderComplete(payload(k, raw)?),
            "SET_DASHBOARD_DATA" => Action::SetDashboardData(payload(k, raw)?),
            "TOGGLE_AI_ASSISTANT" => Action::ToggleAiAssistant,
            "ADD_AI_MESSAGE" => Action::AddAiMessage(payload(k, raw)?),
            "CLEAR_AI_MESSAGES" => Action::ClearAiMessages,
            _ => Action::Unknown,
        };
        Ok(action)
    }
}

impl Action {
    /// Wire tag, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetLoading(_) => "SET_LOADING",
            Action::SetError(_) => "SET_ERROR",
            Action::ClearError => "CLEAR_ERROR",
            Action::SetSuccess(_) => "SET_SUCCESS",
            Action::ClearSuccess => "CLEAR_SUCCESS",
            Action::LoginSuccess(_) => "LOGIN_SUCCESS",
            Action::Logout => "LOGOUT",
            Action::UpdateUser(_) => "UPDATE_USER",
            Action::SetMemories(_) => "SET_MEMORIES",
            Action::AddMemory(_) => "ADD_MEMORY",
            Action::UpdateMemory(_) => "UPDATE_MEMORY",
            Action::DeleteMemory(_) => "DELETE_MEMORY",
            Action::SetReminders(_) => "SET_REMINDERS",
            Action::AddReminder(_) => "ADD_REMINDER",
            Action::UpdateReminder(_) => "UPDATE_REMINDER",
            Action::DeleteReminder(_) => "DELETE_REMINDER",
            Action::ToggleReminderComplete(_) => "TOGGLE_REMINDER_COMPLETE",
            Action::SetDashboardData(_) => "SET_DASHBOARD_DATA",
            Action::ToggleAiAssistant => "TOGGLE_AI_ASSISTANT",
            Action::AddAiMessage(_) => "ADD_AI_MESSAGE",
            Action::ClearAiMessages => "CLEAR_AI_MESSAGES",
            Action::Unknown => "UNKNOWN",
        }
    }
}
