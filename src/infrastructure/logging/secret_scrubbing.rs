use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// Scrubs credentials out of text that is about to leave the process.
///
/// Upstream error bodies can echo request headers or query strings. They
/// are written to logs and embedded in the prompt sent to a third-party
/// model, so every error body passes through [`SecretScrubber::scrub`].
#[derive(Clone)]
pub struct SecretScrubber {
    api_key_pattern: Regex,
    gitlab_token_pattern: Regex,
    auth_header_pattern: Regex,
    field_pattern: Regex,
    password_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new scrubber
    pub fn new() -> Self {
        Self {
            // OpenRouter / OpenAI / Anthropic style keys: sk-or-v1-..., sk-ant-...
            api_key_pattern: Regex::new(r"sk-[a-zA-Z0-9]{0,8}-?[a-zA-Z0-9\-_]{16,}").unwrap(),
            // GitLab personal access tokens
            gitlab_token_pattern: Regex::new(r"glpat-[a-zA-Z0-9\-_]{16,}").unwrap(),
            // Bearer and Basic credentials in Authorization headers
            auth_header_pattern: Regex::new(r"(Bearer|Basic)\s+[a-zA-Z0-9\-_\.=+/]+").unwrap(),
            // token-like JSON or query fields
            field_pattern: Regex::new(
                r#"(?i)["']?(api_key|apikey|access_token|private_token|token|secret)["']?\s*([:=])\s*["']?[a-zA-Z0-9\-_\.]{8,}["']?"#,
            )
            .unwrap(),
            // password fields
            password_pattern: Regex::new(r#"(?i)["']?password["']?\s*[:=]\s*["']?[^"'\s,}&]+["']?"#)
                .unwrap(),
        }
    }

    /// Shared scrubber instance
    pub fn global() -> &'static Self {
        static SCRUBBER: OnceLock<SecretScrubber> = OnceLock::new();
        SCRUBBER.get_or_init(Self::new)
    }

    /// Scrub a message of sensitive data
    pub fn scrub(&self, message: &str) -> String {
        let mut scrubbed = self
            .api_key_pattern
            .replace_all(message, "[API_KEY_REDACTED]")
            .into_owned();
        scrubbed = self
            .gitlab_token_pattern
            .replace_all(&scrubbed, "[TOKEN_REDACTED]")
            .into_owned();
        scrubbed = self
            .auth_header_pattern
            .replace_all(&scrubbed, |caps: &Captures| format!("{} [TOKEN_REDACTED]", &caps[1]))
            .into_owned();
        scrubbed = self
            .field_pattern
            .replace_all(&scrubbed, |caps: &Captures| {
                format!("{}{}[REDACTED]", &caps[1], &caps[2])
            })
            .into_owned();
        scrubbed = self
            .password_pattern
            .replace_all(&scrubbed, "password=[REDACTED]")
            .into_owned();
        scrubbed
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
