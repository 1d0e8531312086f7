//! Pure reducer. Same state + same action always yields the same next state; no I/O.

use super::action::Action;
use super::state::AppState;
use crate::domain::{Memory, Reminder};

/// Apply `action` to `state` and return the next state.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetLoading(loading) => state.is_loading = loading,
        Action::SetError(message) => {
            state.error = Some(message);
            state.is_loading = false;
        }
        Action::ClearError => state.error = None,
        // SET_SUCCESS clears the error, but SET_ERROR leaves `success` alone.
        Action::SetSuccess(message) => {
            state.success = Some(message);
            state.error = None;
        }
        Action::ClearSuccess => state.success = None,

        Action::LoginSuccess(user) => {
            state.subscription = user.tier();
            state.user = Some(user);
            state.is_authenticated = true;
            state.is_loading = false;
            state.error = None;
        }
        Action::Logout => {
            return AppState {
                is_loading: false,
                ..AppState::default()
            };
        }
        Action::UpdateUser(patch) => {
            if let Some(user) = state.user.as_mut() {
                patch.apply_to(user);
                if let Some(tier) = patch.subscription_type {
                    state.subscription = tier;
                }
            }
        }

        Action::SetMemories(memories) => state.memories = memories,
        Action::AddMemory(memory) => state.memories.insert(0, memory),
        Action::UpdateMemory(memory) => replace_by_id(&mut state.memories, memory),
        Action::DeleteMemory(id) => state.memories.retain(|m| m.id != id),

        Action::SetReminders(reminders) => state.reminders = reminders,
        Action::AddReminder(reminder) => state.reminders.insert(0, reminder),
        Action::UpdateReminder(reminder) | Action::ToggleReminderComplete(reminder) => {
            replace_by_id(&mut state.reminders, reminder)
        }
        Action::DeleteReminder(id) => state.reminders.retain(|r| r.id != id),

        Action::SetDashboardData(dashboard) => state.dashboard = dashboard,

        Action::ToggleAiAssistant => state.ai_assistant.is_active = !state.ai_assistant.is_active,
        Action::AddAiMessage(message) => state.ai_assistant.messages.push(message),
        Action::ClearAiMessages => state.ai_assistant.messages.clear(),

        Action::Unknown => {}
    }
    state
}

trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Memory {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Reminder {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Swap in `item` wherever the id matches. Absent id leaves the list unchanged.
fn replace_by_id<T: Identified>(list: &mut [T], item: T) {
    if let Some(slot) = list.iter_mut().find(|existing| existing.id() == item.id()) {
        *slot = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AiMessage, AiRole, DashboardData, DashboardStats, MemoryType, ReminderStatus,
        SubscriptionTier, UserPatch, UserProfile,
    };
    use chrono::{TimeZone, Utc};

    fn memory(id: i64) -> Memory {
        Memory {
            id,
            title: format!("memory {id}"),
            content: Some("body".into()),
            memory_type: MemoryType::Note,
            tags: vec![],
            importance_level: 1,
            is_encrypted: false,
            media_url: None,
            created_at: None,
            updated_at: None,
            last_accessed: None,
            user_id: Some(1),
        }
    }

    fn reminder(id: i64) -> Reminder {
        let at = Utc.with_ymd_and_hms(2024, 1, 20, 14, 0, 0).unwrap();
        Reminder {
            id,
            title: format!("reminder {id}"),
            description: String::new(),
            trigger_date: at,
            frequency: Default::default(),
            status: ReminderStatus::Active,
            memory_id: None,
            created_at: at,
        }
    }

    fn user(tier: SubscriptionTier) -> UserProfile {
        UserProfile {
            id: 1,
            name: Some("Ada".into()),
            email: "ada@example.com".into(),
            subscription_type: Some(tier),
            created_at: None,
            is_active: Some(true),
        }
    }

    fn run(actions: Vec<Action>) -> AppState {
        actions.into_iter().fold(AppState::default(), reduce)
    }

    fn busy_sequence() -> Vec<Action> {
        vec![
            Action::SetLoading(true),
            Action::LoginSuccess(user(SubscriptionTier::Premium)),
            Action::SetMemories(vec![memory(1), memory(2)]),
            Action::AddReminder(reminder(9)),
            Action::SetSuccess("saved".into()),
            Action::ToggleAiAssistant,
            Action::AddAiMessage(AiMessage {
                role: AiRole::User,
                content: "hi".into(),
            }),
            Action::SetDashboardData(DashboardData {
                stats: Some(DashboardStats {
                    total_memories: 2,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            Action::SetLoading(true),
        ]
    }

    #[test]
    fn test_replay_is_deterministic() {
        assert_eq!(run(busy_sequence()), run(busy_sequence()));
    }

    #[test]
    fn test_logout_resets_to_initial_state() {
        let mut actions = busy_sequence();
        actions.push(Action::Logout);
        let state = run(actions);
        assert_eq!(state, AppState::default());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_login_success_sets_session() {
        let state = run(vec![
            Action::SetLoading(true),
            Action::SetError("boom".into()),
            Action::SetLoading(true),
            Action::LoginSuccess(user(SubscriptionTier::Premium)),
        ]);
        assert!(state.is_authenticated);
        assert!(state.user.is_some());
        assert_eq!(state.subscription, SubscriptionTier::Premium);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_set_success_clears_error() {
        let state = run(vec![
            Action::SetError("bad".into()),
            Action::SetSuccess("good".into()),
        ]);
        assert_eq!(state.error, None);
        assert_eq!(state.success.as_deref(), Some("good"));
    }

    #[test]
    fn test_set_error_keeps_success() {
        let state = run(vec![
            Action::SetSuccess("good".into()),
            Action::SetLoading(true),
            Action::SetError("bad".into()),
        ]);
        assert_eq!(state.success.as_deref(), Some("good"));
        assert_eq!(state.error.as_deref(), Some("bad"));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_clear_flags() {
        let state = run(vec![
            Action::SetSuccess("good".into()),
            Action::SetError("bad".into()),
            Action::ClearError,
            Action::ClearSuccess,
        ]);
        assert_eq!(state.error, None);
        assert_eq!(state.success, None);
    }

    #[test]
    fn test_add_then_delete_restores_list() {
        let before = run(vec![Action::SetMemories(vec![memory(1), memory(2)])]);
        let after = reduce(
            reduce(before.clone(), Action::AddMemory(memory(3))),
            Action::DeleteMemory(3),
        );
        assert_eq!(after.memories, before.memories);
    }

    #[test]
    fn test_add_memory_prepends() {
        let state = run(vec![
            Action::SetMemories(vec![memory(1)]),
            Action::AddMemory(memory(2)),
        ]);
        let ids: Vec<i64> = state.memories.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_delete_keeps_order() {
        let state = run(vec![
            Action::SetMemories(vec![memory(1), memory(2), memory(3)]),
            Action::DeleteMemory(2),
        ]);
        let ids: Vec<i64> = state.memories.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_update_memory_replaces_by_id() {
        let mut edited = memory(2);
        edited.title = "edited".into();
        let state = run(vec![
            Action::SetMemories(vec![memory(1), memory(2)]),
            Action::UpdateMemory(edited.clone()),
        ]);
        assert_eq!(state.memories[1], edited);
        assert_eq!(state.memories[0], memory(1));
    }

    #[test]
    fn test_update_unknown_memory_is_noop() {
        let before = run(vec![Action::SetMemories(vec![memory(1), memory(2)])]);
        let after = reduce(before.clone(), Action::UpdateMemory(memory(42)));
        assert_eq!(after, before);
    }

    #[test]
    fn test_reminder_transitions() {
        let mut done = reminder(2);
        done.status = ReminderStatus::Completed;
        let state = run(vec![
            Action::SetReminders(vec![reminder(1), reminder(2), reminder(3)]),
            Action::ToggleReminderComplete(done.clone()),
            Action::DeleteReminder(1),
        ]);
        assert_eq!(state.reminders, vec![done, reminder(3)]);
    }

    #[test]
    fn test_update_user_merges_and_tracks_tier() {
        let state = run(vec![
            Action::LoginSuccess(user(SubscriptionTier::Free)),
            Action::UpdateUser(UserPatch {
                name: Some("Grace".into()),
                subscription_type: Some(SubscriptionTier::Premium),
                ..Default::default()
            }),
        ]);
        let profile = state.user.as_ref().unwrap();
        assert_eq!(profile.name.as_deref(), Some("Grace"));
        assert_eq!(profile.email, "ada@example.com");
        assert!(state.is_premium());
    }

    #[test]
    fn test_update_user_without_session_is_noop() {
        let state = run(vec![Action::UpdateUser(UserPatch {
            subscription_type: Some(SubscriptionTier::Premium),
            ..Default::default()
        })]);
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_ai_assistant_transitions() {
        let msg = AiMessage {
            role: AiRole::Assistant,
            content: "hello".into(),
        };
        let state = run(vec![
            Action::ToggleAiAssistant,
            Action::AddAiMessage(msg.clone()),
            Action::AddAiMessage(msg.clone()),
        ]);
        assert!(state.ai_assistant.is_active);
        assert_eq!(state.ai_assistant.messages.len(), 2);

        let state = reduce(reduce(state, Action::ClearAiMessages), Action::ToggleAiAssistant);
        assert!(!state.ai_assistant.is_active);
        assert!(state.ai_assistant.messages.is_empty());
    }

    #[test]
    fn test_unknown_action_returns_state_unchanged() {
        let before = run(busy_sequence());
        assert_eq!(reduce(before.clone(), Action::Unknown), before);
    }
}
