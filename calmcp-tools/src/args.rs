//! Typed per-tool argument records, deserialised from the raw argument bag.

use calmcp_core::{ArgumentBag, Result, ToolError};
use serde::{de::DeserializeOwned, de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventArgs {
    pub summary: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEventsArgs {
    pub time_min: String,
    pub time_max: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub max_results: Option<u32>,
}

/// Every field except the id is optional; `None` means "keep what's stored".
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEventArgs {
    pub event_id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteEventArgs {
    pub event_id: String,
}

pub fn parse<T: DeserializeOwned>(tool: &'static str, args: ArgumentBag) -> Result<T> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::invalid(tool, e.to_string()))
}

/// Accepts `25` as well as `"25"`.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Option::<Value>::deserialize(deserializer)? {
        | None | Some(Value::Null) => return Ok(None),
        | Some(value) => value,
    };

    let parsed = match &count {
        | Value::Number(n) => n.as_u64(),
        | Value::String(s) => s.trim().parse().ok(),
        | _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("max_results must be an integer, got {count}")))
}
