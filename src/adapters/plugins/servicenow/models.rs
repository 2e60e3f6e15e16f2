//! ServiceNow Table API response models.

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope of a Table API query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    /// Matching records.
    pub result: Vec<Incident>,
}

/// An incident record, reduced to the fields the fetcher reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    /// Ticket number, e.g. `INC0010001`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: Option<String>,
    /// One-line summary.
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_description: Option<String>,
    /// State label (or numeric code when display values are off).
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
}

impl Incident {
    /// `"{short_description} — {state}"`, with `N/A` for missing fields.
    pub fn summary_line(&self) -> String {
        format!(
            "{} — {}",
            non_empty(self.short_description.as_deref()),
            non_empty(self.state.as_deref())
        )
    }
}

fn non_empty(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}

/// Accept strings, numbers and `{ "display_value": .. }` objects.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Object(map)) => map
            .get("display_value")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}
