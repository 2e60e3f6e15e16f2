//! GitLab pipeline models.

use serde::{Deserialize, Serialize};

/// A CI pipeline as returned by the pipelines API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Global pipeline ID.
    pub id: u64,
    /// Branch or tag the pipeline ran on.
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    /// Pipeline status, e.g. `success` or `failed`.
    pub status: String,
    /// Web URL of the pipeline.
    #[serde(default)]
    pub web_url: Option<String>,
}

impl Pipeline {
    /// `Pipeline #{id} on branch {ref} has status: {status}`
    pub fn summary_line(&self) -> String {
        format!(
            "Pipeline #{} on branch {} has status: {}",
            self.id,
            self.git_ref.as_deref().unwrap_or("unknown"),
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let pipeline: Pipeline = serde_json::from_value(serde_json::json!({
            "id": 123_456,
            "ref": "main",
            "status": "failed",
            "sha": "abc"
        }))
        .unwrap();

        assert_eq!(
            pipeline.summary_line(),
            "Pipeline #123456 on branch main has status: failed"
        );
    }

    #[test]
    fn test_summary_line_without_ref() {
        let pipeline: Pipeline =
            serde_json::from_value(serde_json::json!({"id": 7, "status": "running"})).unwrap();
        assert_eq!(
            pipeline.summary_line(),
            "Pipeline #7 on branch unknown has status: running"
        );
    }
}
