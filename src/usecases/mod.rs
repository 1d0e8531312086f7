//! Application use cases. Orchestrate ports and report through the store.

pub mod auth_service;
pub mod dashboard_service;
pub mod memory_service;
pub mod reminder_service;

pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use memory_service::MemoryService;
pub use reminder_service::ReminderService;
