//! User query model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::QueryError;

/// First run of six or more digits, optionally prefixed with `#`.
const PIPELINE_ID_PATTERN: &str = r"#?(\d{6,})";

fn pipeline_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PIPELINE_ID_PATTERN).expect("pipeline id pattern is valid"))
}

/// One line of free text submitted by the user.
///
/// The text is kept verbatim (only surrounding whitespace is trimmed); it
/// is forwarded as-is to the ticket search and embedded in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Parse user input into a query. Blank input is rejected.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract a CI pipeline identifier from the query text.
    ///
    /// Returns the first run of 6+ digits (a leading `#` is accepted and
    /// stripped), e.g. `"pipeline #482913 failing"` yields `"482913"`.
    /// Shorter digit runs such as `"abc123"` yield `None`.
    pub fn pipeline_id(&self) -> Option<&str> {
        pipeline_id_regex()
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
