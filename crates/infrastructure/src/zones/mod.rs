pub mod memory;

pub use memory::{MemoryZoneStore, ZoneLookup};
