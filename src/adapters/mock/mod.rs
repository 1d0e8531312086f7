//! In-process adapters for ports the backend does not serve yet.

pub mod reminder_mock;

pub use reminder_mock::MockReminderAdapter;
