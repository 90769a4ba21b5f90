use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Canonical page shape every cell consumes, regardless of which envelope
/// the upstream endpoint replied with.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page_size: Option<u64>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page_size: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Maps any of the known upstream response envelopes into one `Page<T>`.
///
/// Accepted shapes:
/// - a bare JSON array
/// - DRF pagination: `{"results": [...], "count": N, "page_size": N}`
/// - ad hoc wrappers: `{"<key>": [...], "total_found": N}` for any key in
///   `list_keys`
///
/// Anything else normalizes to an empty page. Elements that fail to decode
/// are skipped rather than failing the whole page.
pub fn normalize_page<T>(value: Value, list_keys: &[&str]) -> Page<T>
where
    T: DeserializeOwned,
{
    match value {
        Value::Array(items) => {
            let items = decode_items(items);
            let total = items.len() as u64;
            Page {
                items,
                total,
                page_size: None,
            }
        }
        Value::Object(mut map) => {
            let page_size = map.get("page_size").and_then(Value::as_u64);

            if let Some(Value::Array(items)) = map.remove("results") {
                let count = map.get("count").and_then(Value::as_u64);
                let items = decode_items(items);
                let total = count.unwrap_or(items.len() as u64);
                return Page {
                    items,
                    total,
                    page_size,
                };
            }

            for key in list_keys {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    let total_found = map.get("total_found").and_then(Value::as_u64);
                    let items = decode_items(items);
                    let total = total_found.unwrap_or(items.len() as u64);
                    return Page {
                        items,
                        total,
                        page_size,
                    };
                }
            }

            warn!("Unrecognized response envelope, treating as empty page");
            Page::empty()
        }
        other => {
            warn!("Non-collection response ({}), treating as empty page", kind(&other));
            Page::empty()
        }
    }
}

fn decode_items<T>(items: Vec<Value>) -> Vec<T>
where
    T: DeserializeOwned,
{
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!("Skipping undecodable list element: {}", err);
                None
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
