//! ServiceNow ticketing adapter.
//!
//! Searches the incident table for tickets whose short description
//! contains the user query.

pub mod client;
pub mod models;
pub mod ticket_search;

pub use client::ServiceNowClient;
pub use ticket_search::TicketSearchFetcher;
