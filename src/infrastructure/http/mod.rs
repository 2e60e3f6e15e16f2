//! HTTP client adapter used by all upstream integrations.

pub mod client;

pub use client::{shorten, Auth, HttpClient, HttpResponse, ResponseBody};
