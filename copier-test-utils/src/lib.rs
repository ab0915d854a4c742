//! Test utilities for the result set copier
//!
//! This crate provides mock acquirers and resources that record every
//! interaction, plus builders for failure scenarios.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::ScenarioBuilder;
pub use mocks::{Interaction, InteractionLog, MockAcquirer, MockResource, StaticRows};
