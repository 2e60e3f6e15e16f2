//! Subcommand implementations.

pub mod ask;
pub mod config;
pub mod interactive;
pub mod prompt;

use anyhow::Context;

use crate::domain::models::Query;

/// Join positional words into a validated query.
pub(crate) fn parse_query(words: &[String]) -> anyhow::Result<Query> {
    Query::parse(&words.join(" ")).context("Invalid query")
}
