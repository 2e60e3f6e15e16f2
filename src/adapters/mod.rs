//! Infrastructure adapters for external systems.

pub mod completion;
pub mod plugins;
