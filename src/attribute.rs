//! Raw attribute storage for entities.
//!
//! A persisted row marks a translatable field `F` with a column `_F` holding
//! the id of its translation group. On ingest that column becomes an explicit
//! `Attribute::TranslatableMarker`, so nothing past this module has to sniff
//! key prefixes or value types to tell markers from plain columns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Prefix marking a translation-group column in raw rows.
pub const MARKER_PREFIX: char = '_';

/// Identifier of a translation group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupId {
    Int(i64),
    Text(String),
}

impl GroupId {
    /// Read a group id out of a raw column value. Only integers and strings qualify.
    pub fn from_json(value: &Value) -> Option<GroupId> {
        match value {
            Value::Number(n) => n.as_i64().map(GroupId::Int),
            Value::String(s) => Some(GroupId::Text(s.clone())),
            _ => None,
        }
    }

    /// The id as a raw column value.
    pub fn to_json(&self) -> Value {
        match self {
            GroupId::Int(id) => Value::from(*id),
            GroupId::Text(id) => Value::from(id.as_str()),
        }
    }
}

impl From<i64> for GroupId {
    fn from(id: i64) -> Self {
        GroupId::Int(id)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        GroupId::Text(id.to_string())
    }
}

impl From<String> for GroupId {
    fn from(id: String) -> Self {
        GroupId::Text(id)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupId::Int(id) => write!(f, "{}", id),
            GroupId::Text(id) => f.write_str(id),
        }
    }
}

/// One stored attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// An ordinary column value.
    Plain(Value),
    /// The column `_F` of a translatable field `F`; its values live in this group.
    TranslatableMarker(GroupId),
}

/// Raw column name -> attribute, as held by one entity.
///
/// Markers stay under their `_F` column, so a row may carry both a plain `F`
/// and the marker `_F` without one hiding the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    attributes: BTreeMap<String, Attribute>,
}

/// If `key` is `_F`, return `F`.
fn marked_field(key: &str) -> Option<&str> {
    key.strip_prefix(MARKER_PREFIX).filter(|field| !field.is_empty())
}

/// The marker column for `field`: `name` -> `_name`.
fn marker_key(field: &str) -> String {
    format!("{}{}", MARKER_PREFIX, field)
}

impl AttributeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a raw row, turning `_F: <id>` columns into markers for `F`.
    pub fn from_raw(row: Map<String, Value>) -> Self {
        let mut store = Self::new();
        for (key, value) in row {
            store.set_raw(&key, value);
        }
        store
    }

    /// Assign a single raw column with the same normalisation as `from_raw`.
    ///
    /// Assigning `_name` an integer or string re-points `name` at that group.
    /// Any other value replaces the marker with a plain column, after which
    /// `name` is no longer translatable.
    pub fn set_raw(&mut self, key: &str, value: Value) {
        let attribute = match (marked_field(key), GroupId::from_json(&value)) {
            (Some(_), Some(id)) => Attribute::TranslatableMarker(id),
            _ => Attribute::Plain(value),
        };
        self.attributes.insert(key.to_string(), attribute);
    }

    /// Store a plain column under `key`, replacing whatever was there.
    pub fn insert_plain(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes
            .insert(key.into(), Attribute::Plain(value.into()));
    }

    /// Mark `field` as translatable in group `id` (stored as the `_field` column).
    pub fn insert_marker(&mut self, field: &str, id: impl Into<GroupId>) {
        self.attributes
            .insert(marker_key(field), Attribute::TranslatableMarker(id.into()));
    }

    /// The attribute stored under the raw column `key`.
    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// The plain value stored under `key`, if any.
    pub fn plain(&self, key: &str) -> Option<&Value> {
        match self.attributes.get(key) {
            Some(Attribute::Plain(value)) => Some(value),
            _ => None,
        }
    }

    /// The translation group `field` points at, if its `_field` column holds a marker.
    pub fn marker(&self, field: &str) -> Option<&GroupId> {
        self.reference(&marker_key(field))
    }

    /// The translation group held by the raw column `key` itself (`_F` form).
    pub fn reference(&self, key: &str) -> Option<&GroupId> {
        match self.attributes.get(key) {
            Some(Attribute::TranslatableMarker(id)) => Some(id),
            _ => None,
        }
    }

    /// Whether `key` exists in the raw row.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Column names of the raw row, markers included as `_F`.
    pub fn raw_keys(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    /// Export back to the raw row shape.
    pub fn to_raw(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .map(|(key, attribute)| match attribute {
                Attribute::Plain(value) => (key.clone(), value.clone()),
                Attribute::TranslatableMarker(id) => (key.clone(), id.to_json()),
            })
            .collect()
    }

    /// Names of all translatable fields (without the `_` prefix).
    pub fn translatable_fields(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().filter_map(|(key, attribute)| match attribute {
            Attribute::TranslatableMarker(_) => marked_field(key),
            Attribute::Plain(_) => None,
        })
    }

    /// Number of raw columns.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the row has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
