//! GitLab CI adapter.

pub mod client;
pub mod models;
pub mod pipeline;

pub use client::GitLabClient;
pub use pipeline::PipelineFetcher;
