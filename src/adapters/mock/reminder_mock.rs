//! Mock reminder adapter. The backend has no reminder endpoints the client can use yet.
//!
//! Keeps reminders in memory, seeded with a few samples, and simulates network latency.

use crate::domain::{
    DomainError, NewReminder, Reminder, ReminderFrequency, ReminderQuery, ReminderStatus,
};
use crate::ports::ReminderPort;
use chrono::{TimeZone, Utc};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

struct ReminderBook {
    items: Vec<Reminder>,
    next_id: i64,
}

/// In-memory ReminderPort with a configurable delay per call.
pub struct MockReminderAdapter {
    book: Mutex<ReminderBook>,
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockReminderAdapter {
    /// Seeded adapter with the default delay (500ms).
    pub fn new() -> Self {
        Self::with_delay(500)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self::from_reminders(sample_reminders(), delay_ms)
    }

    /// Start from an explicit list (tests).
    pub fn from_reminders(items: Vec<Reminder>, delay_ms: u64) -> Self {
        let next_id = items.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            book: Mutex::new(ReminderBook { items, next_id }),
            delay_ms,
        }
    }

    async fn latency(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl Default for MockReminderAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::Remote {
        status: 404,
        message: format!("Reminder {} not found", id),
    }
}

#[async_trait::async_trait]
impl ReminderPort for MockReminderAdapter {
    async fn list(&self, query: &ReminderQuery) -> Result<Vec<Reminder>, DomainError> {
        self.latency().await;
        let book = self.book.lock().await;
        let found: Vec<Reminder> = book
            .items
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        info!(count = found.len(), "[MOCK] listed reminders");
        Ok(found)
    }

    async fn create(&self, reminder: &NewReminder) -> Result<Reminder, DomainError> {
        self.latency().await;
        let mut book = self.book.lock().await;
        let created = Reminder {
            id: book.next_id,
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            trigger_date: reminder.trigger_date,
            frequency: reminder.frequency,
            status: ReminderStatus::Active,
            memory_id: reminder.memory_id,
            created_at: Utc::now(),
        };
        book.next_id += 1;
        book.items.insert(0, created.clone());
        info!(reminder_id = created.id, "[MOCK] reminder created");
        Ok(created)
    }

    async fn toggle_complete(&self, id: i64) -> Result<Reminder, DomainError> {
        self.latency().await;
        let mut book = self.book.lock().await;
        let reminder = book
            .items
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        reminder.status = if reminder.is_completed() {
            ReminderStatus::Active
        } else {
            ReminderStatus::Completed
        };
        Ok(reminder.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.latency().await;
        let mut book = self.book.lock().await;
        let before = book.items.len();
        book.items.retain(|r| r.id != id);
        if book.items.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

/// Sample data shown until reminders are served by the backend.
fn sample_reminders() -> Vec<Reminder> {
    let at = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).single();
    let rows = [
        (
            1,
            "Review quarterly goals",
            "Check progress on Q4 objectives and plan for next quarter",
            at(20, 14),
            ReminderFrequency::Monthly,
            ReminderStatus::Active,
            Some(1),
            at(15, 10),
        ),
        (
            2,
            "Call dentist for checkup",
            "Schedule routine dental cleaning appointment",
            at(18, 9),
            ReminderFrequency::Once,
            ReminderStatus::Overdue,
            None,
            at(10, 15),
        ),
        (
            3,
            "Water plants",
            "Water all indoor plants and check soil moisture",
            at(17, 8),
            ReminderFrequency::Weekly,
            ReminderStatus::Completed,
            None,
            at(5, 12),
        ),
    ];
    rows.into_iter()
        .filter_map(
            |(id, title, description, trigger, frequency, status, memory_id, created)| {
                Some(Reminder {
                    id,
                    title: title.to_string(),
                    description: description.to_string(),
                    trigger_date: trigger?,
                    frequency,
                    status,
                    memory_id,
                    created_at: created?,
                })
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_list_filters() {
        let adapter = MockReminderAdapter::with_delay(0);
        let all = adapter.list(&ReminderQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let weekly = adapter
            .list(&ReminderQuery {
                frequency: Some(ReminderFrequency::Weekly),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].title, "Water plants");
    }

    #[tokio::test]
    async fn test_create_toggle_delete() {
        let adapter = MockReminderAdapter::with_delay(0);
        let created = adapter
            .create(&NewReminder {
                title: "Stretch".into(),
                description: String::new(),
                trigger_date: Utc::now(),
                frequency: ReminderFrequency::Daily,
                memory_id: None,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.status, ReminderStatus::Active);

        let toggled = adapter.toggle_complete(created.id).await.unwrap();
        assert!(toggled.is_completed());
        let toggled = adapter.toggle_complete(created.id).await.unwrap();
        assert!(!toggled.is_completed());

        adapter.delete(created.id).await.unwrap();
        assert_eq!(adapter.delete(created.id).await, Err(not_found(created.id)));
    }
}
