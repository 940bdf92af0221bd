// Common types shared across the pipeline stages

pub mod entity_ids;

pub use entity_ids::*;
