//! Domain layer for the Unified AI assistant
//!
//! This module contains the request-cycle models and the port traits that
//! source and completion adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{QueryError, UpstreamError};
