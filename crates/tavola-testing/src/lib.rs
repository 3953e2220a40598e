//! Test utilities for Tavola services.
//!
//! Provides `MockAuth` identity headers, token/profile fixtures, and the
//! in-process `MockProvider` identity server. Import in `#[cfg(test)]` blocks
//! and `tests/` crates only — never in production code.

pub mod auth;
pub mod fixture;
pub mod provider;
