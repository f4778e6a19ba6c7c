//! Description field of remote workflow rows.
//!
//! The hosted store keeps a single `description` text column. Rows written by
//! the studio store a JSON envelope there (`{"desc", "steps", "meta": {...}}`),
//! older rows a plain sentence. The decision is made once, when a row is read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Presentation and classification metadata carried inside the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
}

/// Envelope written by the studio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    pub meta: DescriptionMeta,
}

impl StructuredDescription {
    /// Steps from the envelope body, falling back to the ones kept in `meta`.
    pub fn steps(&self) -> &[String] {
        if self.steps.is_empty() {
            self.meta.steps.as_deref().unwrap_or_default()
        } else {
            &self.steps
        }
    }
}

/// Decoded description column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// Literal display text.
    Plain(String),
    /// Studio envelope.
    Structured(StructuredDescription),
}

impl Description {
    /// Decode a raw column value. Never fails: anything that is not a JSON
    /// object is kept as plain text. An object without a `meta` object gets
    /// an empty one.
    pub fn decode(raw: &str) -> Self {
        if !raw.trim_start().starts_with('{') {
            return Self::Plain(raw.to_string());
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => {
                let empty = Map::new();
                let meta = match object.get("meta") {
                    Some(Value::Object(meta)) => meta,
                    _ => &empty,
                };
                Self::Structured(structured_from(&object, meta))
            }
            _ => Self::Plain(raw.to_string()),
        }
    }

    /// Encode back into the column representation.
    pub fn encode(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Structured(envelope) => serde_json::to_string(envelope)
                .unwrap_or_else(|_| envelope.desc.clone().unwrap_or_default()),
        }
    }

    /// Text to show as the record summary, if any.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Plain(text) if !text.trim().is_empty() => Some(text.as_str()),
            Self::Plain(_) => None,
            Self::Structured(envelope) => envelope.desc.as_deref().filter(|d| !d.trim().is_empty()),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    object.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

// Field by field so one badly typed entry does not discard the rest.
fn structured_from(
    object: &Map<String, Value>,
    meta: &Map<String, Value>,
) -> StructuredDescription {
    StructuredDescription {
        desc: string_field(object, "desc").or_else(|| string_field(object, "description")),
        steps: string_list(object, "steps").unwrap_or_default(),
        meta: DescriptionMeta {
            dept: string_field(meta, "dept"),
            level: string_field(meta, "level"),
            tools: string_list(meta, "tools"),
            color: string_field(meta, "color"),
            height: meta
                .get("height")
                .and_then(Value::as_u64)
                .and_then(|h| u32::try_from(h).ok()),
            steps: string_list(meta, "steps"),
        },
    }
}
