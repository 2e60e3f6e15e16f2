//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - SourceFetcher: one external system feeding one prompt section
//! - CompletionClient: hosted language model completions

pub mod completion_client;
pub mod source_fetcher;

pub use completion_client::CompletionClient;
pub use source_fetcher::SourceFetcher;
