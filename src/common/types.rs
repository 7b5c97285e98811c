use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// App id as the lookup service accepts it: numeric track id or textual
/// bundle id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppId {
    Track(u64),
    Bundle(String),
}

impl AppId {
    /// Numeric input becomes a track id, anything else a bundle id.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(id) => AppId::Track(id),
            Err(_) => AppId::Bundle(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppId::Track(id) => write!(f, "{}", id),
            AppId::Bundle(bundle) => write!(f, "{}", bundle),
        }
    }
}

/// One logical storefront query. Immutable, constructed per call.
#[derive(Debug, Clone)]
pub enum Query {
    /// Free-text search for apps matching a term.
    Search { term: String, num: usize, page: usize },
    /// Named RSS collection feed, optionally narrowed to a genre id.
    Collection {
        collection: String,
        category: Option<u32>,
        num: usize,
    },
    /// Every app published by one developer id.
    Developer { developer_id: u64 },
    /// Apps the store associates with a given app.
    Similar { app_id: u64 },
    /// Full detail record for a single app.
    Details { app_id: AppId },
    /// Full detail records for several app ids in one request.
    BatchDetails { app_ids: Vec<u64> },
}

/// A single normalized record, wrapping exactly the JSON object the endpoint
/// returned.
///
/// No field is ever invented: accessors only navigate what the source
/// response exposed, and `null` values are dropped at construction so they
/// read as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppRecord(Map<String, Value>);

impl AppRecord {
    /// Wrap a JSON object, discarding top-level nulls. Non-objects yield
    /// `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(
                map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
            )),
            _ => None,
        }
    }

    /// Record carrying only an app id, for endpoints that return bare id
    /// arrays.
    pub fn from_track_id(id: u64) -> Self {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(id));
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The app id under any of the three spellings the endpoints use:
    /// `trackId` (lookup), `id` (search results and id arrays), or the RSS
    /// feed's nested `id.attributes.im:id`.
    pub fn track_id(&self) -> Option<u64> {
        if let Some(id) = self.0.get("trackId").and_then(Value::as_u64) {
            return Some(id);
        }
        match self.0.get("id") {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.parse().ok(),
            Some(Value::Object(nested)) => nested
                .get("attributes")
                .and_then(|attrs| attrs.get("im:id"))
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.0
            .get("trackName")
            .or_else(|| self.0.get("title"))
            .and_then(Value::as_str)
    }

    pub fn developer_id(&self) -> Option<u64> {
        self.0.get("artistId").and_then(Value::as_u64)
    }

    pub fn developer_name(&self) -> Option<&str> {
        self.0.get("artistName").and_then(Value::as_str)
    }

    pub fn wrapper_type(&self) -> Option<&str> {
        self.0.get("wrapperType").and_then(Value::as_str)
    }

    /// Flatten the record for tabular export: array values are joined into
    /// one comma-separated string, everything else passes through. Detail
    /// responses are at most two-dimensional, so joining is sufficient.
    pub fn flattened(&self) -> AppRecord {
        let map = self
            .0
            .iter()
            .map(|(key, value)| {
                let flat = match value {
                    Value::Array(items) => {
                        let joined = items
                            .iter()
                            .map(|item| match item {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect::<Vec<_>>()
                            .join(",");
                        Value::String(joined)
                    }
                    other => other.clone(),
                };
                (key.clone(), flat)
            })
            .collect();
        AppRecord(map)
    }
}
