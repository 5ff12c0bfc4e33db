//! Item records decoded from the site's JSON data files.
//!
//! Items are loosely typed: a field may be absent, `null`, a string, or a
//! number, and is interpolated into markup exactly as the page script would
//! print it. Nothing is validated.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::{escape_html, format_date, format_epoch_millis, INVALID_DATE};

/// One loosely typed field of an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field {
    /// Key not present in the record.
    #[default]
    Missing,
    Value(Value),
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Field::Value)
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Missing => serializer.serialize_none(),
            Field::Value(v) => v.serialize(serializer),
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Value(Value::String(s.to_string()))
    }
}

impl Field {
    /// Whether the value counts as true in a boolean context.
    ///
    /// Absent, `null`, `false`, zero, and the empty string are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Field::Missing | Field::Value(Value::Null) => false,
            Field::Value(Value::Bool(b)) => *b,
            Field::Value(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Field::Value(Value::String(s)) => !s.is_empty(),
            Field::Value(Value::Array(_)) | Field::Value(Value::Object(_)) => true,
        }
    }

    /// Optional member access: a missing member, or a non-object, yields `Missing`.
    pub fn get(&self, key: &str) -> Field {
        match self {
            Field::Value(Value::Object(map)) => map
                .get(key)
                .cloned()
                .map(Field::Value)
                .unwrap_or_default(),
            _ => Field::Missing,
        }
    }

    /// Display text, escaped when `escape` is set.
    pub fn text(&self, escape: bool) -> Cow<'_, str> {
        let raw = match self {
            Field::Value(Value::String(s)) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        };
        if escape {
            if let Cow::Owned(escaped) = escape_html(&raw) {
                return Cow::Owned(escaped);
            }
        }
        raw
    }

    /// Long-form display date (`March 15, 2024`).
    ///
    /// Numbers are Unix milliseconds and `null` is the epoch; anything
    /// unparseable shows as `Invalid Date`.
    pub fn display_date(&self) -> String {
        match self {
            Field::Value(Value::String(s)) => format_date(s),
            Field::Value(Value::Null) => format_epoch_millis(0),
            Field::Value(Value::Bool(b)) => format_epoch_millis(i64::from(*b)),
            Field::Value(Value::Number(n)) => match n.as_f64() {
                Some(f) if f.is_finite() => format_epoch_millis(f.trunc() as i64),
                _ => INVALID_DATE.to_string(),
            },
            Field::Missing | Field::Value(Value::Array(_)) | Field::Value(Value::Object(_)) => {
                INVALID_DATE.to_string()
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Missing => f.write_str("undefined"),
            Field::Value(value) => write_value(f, value),
        }
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{}", b),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => write!(f, "{}", i),
            (_, Some(u), _) => write!(f, "{}", u),
            (_, _, Some(x)) => write!(f, "{}", x),
            _ => write!(f, "{}", n),
        },
        Value::String(s) => f.write_str(s),
        // Arrays print their elements comma-joined, with null elements empty.
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                if !item.is_null() {
                    write_value(f, item)?;
                }
            }
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
    }
}

/// Entry from `news.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub title: Field,
    pub excerpt: Field,
    pub image: Field,
    pub category: Field,
    pub date: Field,
    pub link: Field,
}

/// Entry from `programs.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    pub title: Field,
    pub description: Field,
    pub image: Field,
}

/// Entry from `events.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub title: Field,
    pub description: Field,
    pub image: Field,
    pub date: Field,
    pub time: Field,
    pub location: Field,
    /// Usually `{ "link": "..." }`.
    pub registration: Field,
}

impl Event {
    /// Registration URL, or `#` when there is no usable link.
    pub fn registration_link(&self) -> Field {
        let link = self.registration.get("link");
        if link.is_truthy() {
            link
        } else {
            Field::from("#")
        }
    }
}

/// Entry from `resources.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub title: Field,
    pub description: Field,
    pub category: Field,
    #[serde(rename = "type")]
    pub kind: Field,
    #[serde(rename = "downloadUrl")]
    pub download_url: Field,
}
