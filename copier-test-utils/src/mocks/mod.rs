//! Mock implementations for testing

mod acquirer;
mod resource;
mod rows;

pub use acquirer::{MockAcquirer, ResourceBehavior};
pub use resource::{Interaction, InteractionLog, MockResource};
pub use rows::StaticRows;
