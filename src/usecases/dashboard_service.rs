//! Dashboard summary: recent memories, upcoming reminders and counters.

use crate::domain::{
    DashboardData, DashboardStats, DomainError, Memory, MemoryQuery, Reminder, ReminderQuery,
    ReminderStatus,
};
use crate::ports::{MemoryPort, ReminderPort};
use crate::store::{Action, Store};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

const RECENT_MEMORIES: u32 = 5;
const UPCOMING_REMINDERS: usize = 5;

pub struct DashboardService {
    memories: Arc<dyn MemoryPort>,
    reminders: Arc<dyn ReminderPort>,
    store: Arc<Store>,
}

impl DashboardService {
    pub fn new(
        memories: Arc<dyn MemoryPort>,
        reminders: Arc<dyn ReminderPort>,
        store: Arc<Store>,
    ) -> Self {
        Self {
            memories,
            reminders,
            store,
        }
    }

    /// Fetch both sources concurrently and publish one `SET_DASHBOARD_DATA`.
    pub async fn refresh(&self, now: DateTime<Utc>) -> Result<DashboardData, DomainError> {
        let recent_query = MemoryQuery {
            per_page: RECENT_MEMORIES,
            ..Default::default()
        };
        let all_reminders = ReminderQuery::default();
        let (memories, reminders) = tokio::join!(
            self.memories.list(&recent_query),
            self.reminders.list(&all_reminders)
        );

        let (memories, reminders) = match (memories, reminders) {
            (Ok(m), Ok(r)) => (m, r),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "fetching dashboard data failed");
                self.store.dispatch(Action::SetError(e.user_message()));
                return Err(e);
            }
        };

        let data = summarize(memories.pagination.total, memories.memories, &reminders, now);
        info!(
            total_memories = memories.pagination.total,
            total_reminders = reminders.len(),
            "dashboard refreshed"
        );
        self.store.dispatch(Action::SetDashboardData(data.clone()));
        Ok(data)
    }
}

/// Pure summary: reminders completed on `now`'s UTC date, and the next active ones in time order.
pub fn summarize(
    total_memories: u64,
    recent_memories: Vec<Memory>,
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> DashboardData {
    let today = now.date_naive();
    let completed_today = reminders
        .iter()
        .filter(|r| r.status == ReminderStatus::Completed && r.trigger_date.date_naive() == today)
        .count() as u64;

    let mut upcoming: Vec<Reminder> = reminders
        .iter()
        .filter(|r| r.status == ReminderStatus::Active && r.trigger_date >= now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|r| r.trigger_date);
    upcoming.truncate(UPCOMING_REMINDERS);

    DashboardData {
        stats: Some(DashboardStats {
            total_memories,
            total_reminders: reminders.len() as u64,
            completed_today,
        }),
        recent_memories,
        upcoming_reminders: upcoming,
    }
}
