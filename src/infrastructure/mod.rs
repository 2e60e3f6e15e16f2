//! Infrastructure layer module
//!
//! This module contains the shared plumbing used by adapters and the CLI:
//! - Configuration management (figment layering and validation)
//! - HTTP client shared by every upstream adapter
//! - Logging infrastructure and secret scrubbing

pub mod config;
pub mod http;
pub mod logging;
