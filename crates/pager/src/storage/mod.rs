//! Storage layer for incident persistence.

mod memory;
mod traits;

pub use memory::InMemoryIncidentStore;
pub use traits::IncidentStore;
