//! Domain entities. Pure data structures shared by the store, ports and views.
//!
//! Field names follow the backend's JSON (snake_case), so these types double as
//! wire types for the HTTP adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription tier of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "free"),
            SubscriptionTier::Premium => write!(f, "premium"),
        }
    }
}

/// The authenticated user as returned by `/api/auth/*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub subscription_type: Option<SubscriptionTier>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UserProfile {
    /// Tier to cache in the store. Missing tier means free.
    pub fn tier(&self) -> SubscriptionTier {
        self.subscription_type.unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

/// Partial profile used by `UPDATE_USER`. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<SubscriptionTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserPatch {
    /// Shallow merge: every field present in the patch overwrites the profile's.
    pub fn apply_to(&self, user: &mut UserProfile) {
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(tier) = self.subscription_type {
            user.subscription_type = Some(tier);
        }
        if let Some(active) = self.is_active {
            user.is_active = Some(active);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    #[default]
    Note,
    Process,
    Learning,
    Personal,
    /// Any type this client does not know about yet.
    #[serde(other)]
    Other,
}

impl MemoryType {
    pub const ALL: [MemoryType; 4] = [
        MemoryType::Note,
        MemoryType::Process,
        MemoryType::Learning,
        MemoryType::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryType::Note => "note",
            MemoryType::Process => "process",
            MemoryType::Learning => "learning",
            MemoryType::Personal => "personal",
            MemoryType::Other => "other",
        }
    }
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub memory_type: MemoryType,
    #[serde(default)]
    pub tags: Vec<String>,
    /// 1 (low) to 5 (critical).
    #[serde(default = "default_importance")]
    pub importance_level: u8,
    #[serde(default)]
    pub is_encrypted: bool,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default, deserialize_with = "backend_time::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "backend_time::deserialize")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "backend_time::deserialize")]
    pub last_accessed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

fn default_importance() -> u8 {
    1
}

/// The backend emits naive UTC timestamps (`2024-01-15T10:00:00.123456`); accept those and RFC 3339.
mod backend_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        raw.parse::<NaiveDateTime>()
            .map(|naive| Some(naive.and_utc()))
            .map_err(serde::de::Error::custom)
    }
}

/// Body of `POST /api/memories/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMemory {
    pub title: String,
    pub content: String,
    pub memory_type: MemoryType,
    pub importance_level: u8,
    pub tags: Vec<String>,
}

/// Body of `PUT /api/memories/{id}`. Only present fields are updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<MemoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance_level: Option<u8>,
}

/// Filters for the memory vault listing. Maps onto the query string of `GET /api/memories/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub memory_type: Option<MemoryType>,
    pub importance: Option<u8>,
}

impl Default for MemoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 12,
            search: None,
            memory_type: None,
            importance: None,
        }
    }
}

impl MemoryQuery {
    /// Query pairs in the order the backend documents them. Empty filters are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.trim().to_string()));
        }
        if let Some(kind) = self.memory_type {
            pairs.push(("type", kind.as_str().to_string()));
        }
        if let Some(level) = self.importance {
            pairs.push(("importance", level.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub total: u64,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// One page of memories plus its pagination envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPage {
    #[serde(default)]
    pub memories: Vec<Memory>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    #[default]
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ReminderFrequency {
    pub const ALL: [ReminderFrequency; 5] = [
        ReminderFrequency::Once,
        ReminderFrequency::Daily,
        ReminderFrequency::Weekly,
        ReminderFrequency::Monthly,
        ReminderFrequency::Yearly,
    ];
}

impl std::fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReminderFrequency::Once => "once",
            ReminderFrequency::Daily => "daily",
            ReminderFrequency::Weekly => "weekly",
            ReminderFrequency::Monthly => "monthly",
            ReminderFrequency::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    #[default]
    Active,
    Completed,
    Overdue,
    Paused,
}

impl ReminderStatus {
    pub const ALL: [ReminderStatus; 4] = [
        ReminderStatus::Active,
        ReminderStatus::Completed,
        ReminderStatus::Overdue,
        ReminderStatus::Paused,
    ];
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReminderStatus::Active => "active",
            ReminderStatus::Completed => "completed",
            ReminderStatus::Overdue => "overdue",
            ReminderStatus::Paused => "paused",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub trigger_date: DateTime<Utc>,
    #[serde(default)]
    pub frequency: ReminderFrequency,
    #[serde(default)]
    pub status: ReminderStatus,
    #[serde(default)]
    pub memory_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn is_completed(&self) -> bool {
        self.status == ReminderStatus::Completed
    }
}

/// Input for creating a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReminder {
    pub title: String,
    pub description: String,
    pub trigger_date: DateTime<Utc>,
    pub frequency: ReminderFrequency,
    pub memory_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderQuery {
    pub search: Option<String>,
    pub status: Option<ReminderStatus>,
    pub frequency: Option<ReminderFrequency>,
}

impl ReminderQuery {
    /// Case-insensitive search over title and description, then exact status/frequency filters.
    pub fn matches(&self, reminder: &Reminder) -> bool {
        if let Some(term) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let term = term.trim().to_lowercase();
            if !reminder.title.to_lowercase().contains(&term)
                && !reminder.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != reminder.status) {
            return false;
        }
        if self.frequency.is_some_and(|f| f != reminder.frequency) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_memories: u64,
    pub total_reminders: u64,
    pub completed_today: u64,
}

/// Dashboard summary, replaced wholesale by `SET_DASHBOARD_DATA`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: Option<DashboardStats>,
    pub recent_memories: Vec<Memory>,
    pub upcoming_reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMessage {
    pub role: AiRole,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_from_backend_json() {
        let json = r#"{"id":7,"email":"a@b.com","name":"Ada","subscription_type":"premium",
            "created_at":"2024-01-01T00:00:00","is_active":true}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.tier(), SubscriptionTier::Premium);
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_user_without_tier_is_free() {
        let user: UserProfile = serde_json::from_str(r#"{"id":1,"email":"a@b.com"}"#).unwrap();
        assert_eq!(user.tier(), SubscriptionTier::Free);
        assert_eq!(user.display_name(), "a@b.com");
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut user: UserProfile =
            serde_json::from_str(r#"{"id":1,"email":"a@b.com","name":"Old"}"#).unwrap();
        let patch = UserPatch {
            name: Some("New".into()),
            ..Default::default()
        };
        patch.apply_to(&mut user);
        assert_eq!(user.name.as_deref(), Some("New"));
        assert_eq!(user.email, "a@b.com");
    }

    #[test]
    fn test_unknown_memory_type_maps_to_other() {
        let m: Memory =
            serde_json::from_str(r#"{"id":1,"title":"t","memory_type":"quote"}"#).unwrap();
        assert_eq!(m.memory_type, MemoryType::Other);
        assert_eq!(m.importance_level, 1);
    }

    #[test]
    fn test_memory_accepts_naive_backend_timestamps() {
        let m: Memory = serde_json::from_str(
            r#"{"id":1,"title":"t","created_at":"2024-01-15T10:00:00.123456","last_accessed":null}"#,
        )
        .unwrap();
        assert!(m.created_at.is_some());
        assert!(m.last_accessed.is_none());
    }

    #[test]
    fn test_memory_query_pairs_skip_empty_filters() {
        let q = MemoryQuery {
            search: Some("  ".into()),
            importance: Some(4),
            ..Default::default()
        };
        assert_eq!(
            q.to_pairs(),
            vec![
                ("page", "1".to_string()),
                ("per_page", "12".to_string()),
                ("importance", "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_reminder_query_matches() {
        let r = Reminder {
            id: 1,
            title: "Water plants".into(),
            description: "Check soil moisture".into(),
            trigger_date: Utc::now(),
            frequency: ReminderFrequency::Weekly,
            status: ReminderStatus::Active,
            memory_id: None,
            created_at: Utc::now(),
        };
        let by_text = ReminderQuery {
            search: Some("SOIL".into()),
            ..Default::default()
        };
        assert!(by_text.matches(&r));
        let by_status = ReminderQuery {
            status: Some(ReminderStatus::Completed),
            ..Default::default()
        };
        assert!(!by_status.matches(&r));
    }
}
