//! Cross-cutting pieces shared by the binary and the library.

pub mod config;
