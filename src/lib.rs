//! memoryos: terminal client for the MemoryOS personal knowledge service, with
//! Hexagonal Architecture and a single reducer-driven store.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod routing;
pub mod shared;
pub mod store;
pub mod usecases;
