//! Domain errors for the Unified AI assistant.

use serde::Serialize;
use thiserror::Error;

/// Failure talking to one upstream system (a source API or the completion
/// endpoint).
///
/// Upstream errors never abort a request cycle. Fetchers fold them into a
/// [`SourceBody::Failed`](crate::domain::models::SourceBody::Failed) section
/// and the assistant folds completion failures into a
/// [`CompletionReply::Failed`](crate::domain::models::CompletionReply::Failed).
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpstreamError {
    /// Network-level failure: DNS, connect, TLS, broken body stream.
    #[error("request failed: {message}")]
    Transport {
        /// Underlying client error.
        message: String,
    },

    /// The call did not complete within its time budget.
    #[error("request timed out after {elapsed_ms} ms")]
    Timeout {
        /// Time spent before giving up.
        elapsed_ms: u64,
    },

    /// The upstream answered with a non-2xx status.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly shortened.
        body: String,
    },

    /// The upstream answered 2xx but the payload had an unexpected shape.
    #[error("unexpected response: {message}")]
    Parse {
        /// What failed to decode.
        message: String,
    },

    /// No fetcher or credential was wired up for this source.
    #[error("not configured: {message}")]
    NotConfigured {
        /// Which source or setting is missing.
        message: String,
    },
}

impl UpstreamError {
    /// Build a [`UpstreamError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`UpstreamError::Parse`].
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Build a [`UpstreamError::NotConfigured`].
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured {
            message: message.into(),
        }
    }

    /// Build a [`UpstreamError::Timeout`] from an elapsed duration.
    pub fn timeout(elapsed: std::time::Duration) -> Self {
        Self::Timeout {
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// HTTP status code, when the upstream answered at all.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-friendly name of the error class.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Parse { .. } => "parse",
            Self::NotConfigured { .. } => "not_configured",
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

/// Errors raised while interpreting user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Blank or whitespace-only input.
    #[error("Query cannot be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_contains_code() {
        let err = UpstreamError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn test_non_status_errors_have_no_code() {
        assert_eq!(UpstreamError::transport("dns").status_code(), None);
        assert_eq!(UpstreamError::parse("missing field").status_code(), None);
        assert_eq!(
            UpstreamError::timeout(std::time::Duration::from_millis(1500)),
            UpstreamError::Timeout { elapsed_ms: 1500 }
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let err = UpstreamError::not_configured("gitlab");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "not_configured");
        assert_eq!(json["message"], "gitlab");
    }
}
