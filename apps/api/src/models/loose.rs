//! Absorbing leaf types for CV payloads.
//!
//! CV data arrives from an LLM extraction step, so any field may carry the wrong
//! JSON type. Every type here deserializes from *any* JSON value: a shape it
//! cannot use becomes absence instead of an error, which keeps one malformed
//! field from failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Text
// ────────────────────────────────────────────────────────────────────────────

/// An optional, trimmed, non-empty string.
///
/// Coercion rules:
/// - string → kept (whitespace-only counts as absent)
/// - number / bool → its string form
/// - array of scalars → items joined with `", "`
/// - object with a `value` key → that value (contact-style `{value, link}`)
/// - anything else → absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(Option<String>);

impl Text {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Text(None)
        } else if trimmed.len() == raw.len() {
            Text(Some(raw))
        } else {
            Text(Some(trimmed.to_string()))
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Text::new(s.as_str()),
            Value::Number(n) => Text::new(n.to_string()),
            Value::Bool(b) => Text::new(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter(|v| !v.is_array() && !v.is_object())
                    .filter_map(|v| Text::from_value(v).0)
                    .collect();
                Text::new(parts.join(", "))
            }
            Value::Object(map) => map.get("value").map(Text::from_value).unwrap_or_default(),
            Value::Null => Text(None),
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    /// Returns `self` when present, otherwise `other`.
    pub fn or<'a>(&'a self, other: &'a Text) -> &'a Text {
        if self.is_present() {
            self
        } else {
            other
        }
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Text::from_value(&value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TextList
// ────────────────────────────────────────────────────────────────────────────

/// A list of present `Text` values. A lone scalar becomes a one-item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextList(Vec<String>);

impl TextList {
    pub const EMPTY: TextList = TextList(Vec::new());

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => TextList(
                items
                    .iter()
                    .filter_map(|v| Text::from_value(v).0)
                    .collect(),
            ),
            Value::Object(_) | Value::Null => TextList::default(),
            scalar => TextList(Text::from_value(scalar).0.into_iter().collect()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(TextList::from_value(&value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flag / Count
// ────────────────────────────────────────────────────────────────────────────

/// A lenient boolean: `true`, `"true"`, `"yes"` and `1` are true; everything else false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag(bool);

impl Flag {
    pub fn from_value(value: &Value) -> Self {
        let set = match value {
            Value::Bool(b) => *b,
            Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes"),
            Value::Number(n) => n.as_i64() == Some(1),
            _ => false,
        };
        Flag(set)
    }

    pub fn is_set(self) -> bool {
        self.0
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Flag::from_value(&value))
    }
}

/// A positive integer limit. Numeric strings are accepted; zero, negatives and
/// prose such as `"No limit for now"` mean "no limit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count(Option<usize>);

impl Count {
    pub fn from_value(value: &Value) -> Self {
        let n = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        Count(n.filter(|&n| n > 0).and_then(|n| usize::try_from(n).ok()))
    }

    pub fn get(self) -> Option<usize> {
        self.0
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Count::from_value(&value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DateRange
// ────────────────────────────────────────────────────────────────────────────

/// End-date spellings that mean the engagement is still running.
const ONGOING_WORDS: &[&str] = &["present", "current", "now", "ongoing"];

/// `{start, end, is_current}`. A bare scalar is read as a range with only `start`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Text,
    pub end: Text,
    pub is_current: Flag,
}

impl DateRange {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => DateRange {
                start: map.get("start").map(Text::from_value).unwrap_or_default(),
                end: map.get("end").map(Text::from_value).unwrap_or_default(),
                is_current: map
                    .get("is_current")
                    .map(Flag::from_value)
                    .unwrap_or_default(),
            },
            Value::String(_) | Value::Number(_) => DateRange {
                start: Text::from_value(value),
                ..DateRange::default()
            },
            _ => DateRange::default(),
        }
    }

    /// True when flagged current or when the end is spelled like "Present".
    pub fn is_ongoing(&self) -> bool {
        self.is_current.is_set()
            || self.end.get().is_some_and(|end| {
                let end = end.to_ascii_lowercase();
                ONGOING_WORDS.contains(&end.as_str())
            })
    }

    pub fn is_empty(&self) -> bool {
        !self.start.is_present() && !self.end.is_present() && !self.is_current.is_set()
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(DateRange::from_value(&value))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Loose containers
// ────────────────────────────────────────────────────────────────────────────

/// An object-shaped value that is dropped (not rejected) when its shape is wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Loose<T>(Option<T>);

impl<T> Loose<T> {
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T> Default for Loose<T> {
    fn default() -> Self {
        Loose(None)
    }
}

impl<T> From<T> for Loose<T> {
    fn from(value: T) -> Self {
        Loose(Some(value))
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Loose<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Loose(None));
        }
        Ok(Loose(serde_json::from_value(value).ok()))
    }
}

/// Items of a collection section.
pub trait LooseItem: DeserializeOwned {
    /// Builds an item from a bare scalar found where an object was expected.
    /// Items that have no sensible scalar form keep the default `None`.
    fn from_text(_text: Text) -> Option<Self> {
        None
    }
}

/// A sequence that keeps the elements it can read and silently drops the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct LooseList<T>(Vec<T>);

impl<T> LooseList<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for LooseList<T> {
    fn default() -> Self {
        LooseList(Vec::new())
    }
}

impl<'de, T: LooseItem> Deserialize<'de> for LooseList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Value::Array(elements) = value else {
            return Ok(LooseList::default());
        };

        let items = elements
            .into_iter()
            .filter_map(|element| match element {
                Value::Object(_) => serde_json::from_value(element).ok(),
                Value::Array(_) | Value::Null => None,
                scalar => T::from_text(Text::from_value(&scalar)),
            })
            .collect();
        Ok(LooseList(items))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
