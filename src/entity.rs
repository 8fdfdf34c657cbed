//! A persisted record with translation-aware attribute access.

use crate::attribute::{AttributeStore, GroupId};
use crate::error::{Result, TranslationError};
use crate::group::{GroupCache, TranslationGroup};
use crate::i18n::LocaleProvider;
use crate::table::{TranslationSource, TranslationTable};
use crate::translatable::{Interception, Translatable};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Result of `Entity::get_attribute`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// The whole translation group (key was `_F`).
    Group(&'a TranslationGroup),
    /// A translated value (key was `F`); `None` when no locale has one.
    Text(Option<String>),
    /// An ordinary attribute.
    Plain(&'a Value),
}

impl<'a> From<Interception<'a>> for FieldValue<'a> {
    fn from(interception: Interception<'a>) -> Self {
        match interception {
            Interception::Group(group) => FieldValue::Group(group),
            Interception::Text(text) => FieldValue::Text(text),
        }
    }
}

impl FieldValue<'_> {
    /// The value as text, if it is text-like.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => text.as_deref(),
            FieldValue::Plain(Value::String(text)) => Some(text),
            _ => None,
        }
    }
}

/// A record: raw attributes, the translation groups it has opened, and the
/// locale hooks it reads and writes in.
#[derive(Debug)]
pub struct Entity<P> {
    attributes: AttributeStore,
    translations: GroupCache,
    locales: P,
}

impl<P: LocaleProvider> Entity<P> {
    /// An entity over already-ingested attributes, with an empty group cache.
    pub fn new(attributes: AttributeStore, locales: P) -> Self {
        Self {
            attributes,
            translations: GroupCache::new(),
            locales,
        }
    }

    /// Build from a raw JSON row such as `{"id": 1, "_name": 7}`.
    pub fn from_json(row: Value, locales: P) -> Result<Self> {
        match row {
            Value::Object(map) => Ok(Self::new(AttributeStore::from_raw(map), locales)),
            other => Err(TranslationError::InvalidRow(json_kind(&other).to_string())),
        }
    }

    /// Load translation groups from `source` on first access and save to it on flush.
    pub fn with_source(mut self, source: Arc<dyn TranslationSource>) -> Self {
        self.translations.set_source(source);
        self
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn locales_mut(&mut self) -> &mut P {
        &mut self.locales
    }

    /// Read `key`: translations first, then plain attributes.
    pub fn get_attribute(&mut self, key: &str) -> Result<Option<FieldValue<'_>>> {
        if self.is_translation_reference(key) || self.is_translatable(key) {
            return Ok(self.intercept_get(key)?.map(FieldValue::from));
        }
        Ok(self.attributes.plain(key).map(FieldValue::Plain))
    }

    /// Write `key`: translatable fields take the value in the current locale,
    /// anything else is assigned as a raw column.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        if self.is_translatable(key) {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            self.intercept_set(key, text)?;
            return Ok(());
        }
        self.attributes.set_raw(key, value);
        Ok(())
    }

    /// Whether `key` can be read from this entity.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.has_translatable(key, |key| self.attributes.contains_raw(key))
    }

    /// Give `field` a fresh translation group reserved in `table` (for new records).
    pub fn make_translatable(&mut self, field: &str, table: &TranslationTable) -> Result<GroupId> {
        let id = table.reserve_group_id()?;
        debug!("Allocated translation group {} for '{}'", id, field);
        self.attributes.insert_marker(field, id.clone());
        Ok(id)
    }

    /// Save every changed translation group through the attached source.
    pub fn save_translations(&mut self) -> Result<usize> {
        self.translations.flush()
    }

    /// The raw row, markers written back as `_F` columns.
    pub fn to_raw(&self) -> Value {
        Value::Object(self.attributes.to_raw())
    }
}

impl<P: LocaleProvider> Translatable for Entity<P> {
    type Locales = P;

    fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    fn group_cache(&mut self) -> &mut GroupCache {
        &mut self.translations
    }

    fn locales(&self) -> &P {
        &self.locales
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
