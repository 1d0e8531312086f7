//! Infrastructure adapters. Implement outbound ports and the terminal front-end.
//!
//! REST API, in-process mocks, TUI. Map errors to DomainError.

pub mod http;
pub mod mock;
pub mod ui;
