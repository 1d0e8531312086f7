//! Outbound ports. Application calls into the remote API through these.
//!
//! Implemented by adapters. Every method is one independent round-trip with no retry.

use crate::domain::{
    DomainError, Memory, MemoryPage, MemoryQuery, MemoryUpdate, NewMemory, NewReminder, Reminder,
    ReminderQuery, UserProfile,
};

/// Authentication endpoints (`/api/auth/*`). The credential is the ambient session cookie.
#[async_trait::async_trait]
pub trait SessionPort: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, DomainError>;

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, DomainError>;

    /// Fails unless the server answers with a success status.
    async fn logout(&self) -> Result<(), DomainError>;

    /// The user behind the current session cookie. Fails when no session exists server-side.
    async fn current_user(&self) -> Result<UserProfile, DomainError>;

    /// Renew the session cookie. Never called automatically.
    async fn refresh_token(&self) -> Result<UserProfile, DomainError>;
}

/// Memory vault endpoints (`/api/memories/*`).
#[async_trait::async_trait]
pub trait MemoryPort: Send + Sync {
    async fn list(&self, query: &MemoryQuery) -> Result<MemoryPage, DomainError>;

    async fn get(&self, id: i64) -> Result<Memory, DomainError>;

    async fn create(&self, memory: &NewMemory) -> Result<Memory, DomainError>;

    async fn update(&self, id: i64, changes: &MemoryUpdate) -> Result<Memory, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}

/// Reminder source. No remote endpoint exists yet; see `adapters::mock`.
#[async_trait::async_trait]
pub trait ReminderPort: Send + Sync {
    async fn list(&self, query: &ReminderQuery) -> Result<Vec<Reminder>, DomainError>;

    async fn create(&self, reminder: &NewReminder) -> Result<Reminder, DomainError>;

    /// Flip between completed and active. Returns the updated record.
    async fn toggle_complete(&self, id: i64) -> Result<Reminder, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;
}
