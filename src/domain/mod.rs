//! Core domain layer. No I/O.
//!
//! Entities, the error taxonomy and form rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::{
    AiMessage, AiRole, DashboardData, DashboardStats, Memory, MemoryPage, MemoryQuery,
    MemoryType, MemoryUpdate, NewMemory, NewReminder, Pagination, Reminder, ReminderFrequency,
    ReminderQuery, ReminderStatus, SubscriptionTier, UserPatch, UserProfile,
};
pub use errors::DomainError;
