//! Reminder scheduler flows over ReminderPort.

use crate::domain::validation::ReminderForm;
use crate::domain::{DomainError, Reminder, ReminderQuery};
use crate::ports::ReminderPort;
use crate::store::{Action, Store};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

pub struct ReminderService {
    reminders: Arc<dyn ReminderPort>,
    store: Arc<Store>,
}

impl ReminderService {
    pub fn new(reminders: Arc<dyn ReminderPort>, store: Arc<Store>) -> Self {
        Self { reminders, store }
    }

    fn fail(&self, context: &str, err: DomainError) -> DomainError {
        warn!(error = %err, "{}", context);
        self.store.dispatch(Action::SetError(err.user_message()));
        err
    }

    pub async fn load(&self, query: &ReminderQuery) -> Result<usize, DomainError> {
        self.store.dispatch(Action::SetLoading(true));
        match self.reminders.list(query).await {
            Ok(found) => {
                let count = found.len();
                self.store.dispatch(Action::SetReminders(found));
                self.store.dispatch(Action::SetLoading(false));
                Ok(count)
            }
            Err(e) => {
                self.store.dispatch(Action::SetReminders(Vec::new()));
                Err(self.fail("fetching reminders failed", e))
            }
        }
    }

    /// `now` anchors the future-date rule.
    pub async fn create(
        &self,
        form: ReminderForm,
        now: DateTime<Utc>,
    ) -> Result<Reminder, DomainError> {
        let body = form.into_new_reminder(now)?;
        self.store.dispatch(Action::ClearError);
        match self.reminders.create(&body).await {
            Ok(reminder) => {
                self.store.dispatch(Action::AddReminder(reminder.clone()));
                self.store
                    .dispatch(Action::SetSuccess("Reminder created successfully!".into()));
                Ok(reminder)
            }
            Err(e) => Err(self.fail("creating reminder failed", e)),
        }
    }

    pub async fn toggle_complete(&self, id: i64) -> Result<Reminder, DomainError> {
        match self.reminders.toggle_complete(id).await {
            Ok(reminder) => {
                self.store
                    .dispatch(Action::ToggleReminderComplete(reminder.clone()));
                Ok(reminder)
            }
            Err(e) => Err(self.fail("toggling reminder failed", e)),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        match self.reminders.delete(id).await {
            Ok(()) => {
                self.store.dispatch(Action::DeleteReminder(id));
                Ok(())
            }
            Err(e) => Err(self.fail("deleting reminder failed", e)),
        }
    }
}
