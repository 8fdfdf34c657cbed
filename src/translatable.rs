//! Translation-aware attribute access for entities.
//!
//! An entity implements [`Translatable`] by exposing its attribute store, its
//! group cache and its locale provider. Its own `get`/`set`/`has` accessors
//! then call [`Translatable::intercept_get`], [`Translatable::intercept_set`]
//! and [`Translatable::has_translatable`] before falling back to plain storage.
//!
//! Keys follow the raw row convention: for a translatable field `name` the row
//! carries `_name`. Reading `name` yields the value in the current locale;
//! reading `_name` yields the whole [`TranslationGroup`].

use crate::attribute::{AttributeStore, GroupId, MARKER_PREFIX};
use crate::error::{Result, TranslationError};
use crate::group::{GroupCache, TranslationGroup};
use crate::i18n::{LocaleProvider, TranslationMetrics};
use tracing::warn;

/// Outcome of a handled read.
#[derive(Debug, Clone, PartialEq)]
pub enum Interception<'a> {
    /// `_F` was read: the raw multi-locale group.
    Group(&'a TranslationGroup),
    /// `F` was read: the value in the current locale, or the fallback.
    Text(Option<String>),
}

pub trait Translatable {
    type Locales: LocaleProvider;

    fn attributes(&self) -> &AttributeStore;

    fn group_cache(&mut self) -> &mut GroupCache;

    fn locales(&self) -> &Self::Locales;

    /// True iff the raw row holds a group id under `_key`.
    fn is_translatable(&self, key: &str) -> bool {
        self.attributes().marker(key).is_some()
    }

    /// True iff `key` starts with `_` and the raw row holds a group id under it.
    ///
    /// Underscore columns holding anything else (null, floats, ...) are plain
    /// columns and are left to the host's default handling.
    fn is_translation_reference(&self, key: &str) -> bool {
        key.starts_with(MARKER_PREFIX) && self.attributes().reference(key).is_some()
    }

    /// The group id stored for `key` (either `F` or `_F`).
    fn resolve_group_id(&self, key: &str) -> Result<GroupId> {
        let attributes = self.attributes();
        if let Some(id) = attributes.marker(key) {
            return Ok(id.clone());
        }
        if self.is_translation_reference(key) {
            if let Some(id) = attributes.reference(key) {
                return Ok(id.clone());
            }
        }
        Err(TranslationError::KeyNotTranslatable(key.to_string()))
    }

    /// The cached group for `key`, opened on first use.
    fn group(&mut self, key: &str) -> Result<&mut TranslationGroup> {
        let id = self.resolve_group_id(key)?;
        self.group_cache().open(&id)
    }

    /// Translation-aware read. `None` means the key is not ours to handle.
    fn intercept_get(&mut self, key: &str) -> Result<Option<Interception<'_>>> {
        if self.is_translation_reference(key) {
            let group = self.group(key)?;
            return Ok(Some(Interception::Group(group)));
        }

        if self.is_translatable(key) {
            let current = self.locales().current_locale();
            let fallback = self.locales().fallback_locale();
            let group = self.group(key)?;

            let text = match group.get(&current) {
                Some(value) => Some(value.to_string()),
                None => {
                    let resolved = group.in_locale(&current, &fallback).map(str::to_string);
                    let metrics = TranslationMetrics::global();
                    if resolved.is_some() {
                        metrics.record_fallback_read();
                        warn!(
                            "No '{}' translation for '{}' (group {}), using '{}'",
                            current,
                            key,
                            group.id(),
                            fallback
                        );
                    } else {
                        metrics.record_missing_read();
                        warn!(
                            "No '{}' or '{}' translation for '{}' (group {})",
                            current,
                            fallback,
                            key,
                            group.id()
                        );
                    }
                    resolved
                }
            };
            return Ok(Some(Interception::Text(text)));
        }

        Ok(None)
    }

    /// Translation-aware write in the current locale. `false` means not handled.
    fn intercept_set(&mut self, key: &str, value: impl Into<String>) -> Result<bool>
    where
        Self: Sized,
    {
        if !self.is_translatable(key) {
            return Ok(false);
        }

        let current = self.locales().current_locale();
        self.group(key)?.set(current, value);
        Ok(true)
    }

    /// Translation-aware existence check over the host's default check.
    fn has_translatable(&self, key: &str, default_has: impl FnOnce(&str) -> bool) -> bool
    where
        Self: Sized,
    {
        self.is_translatable(key) || default_has(key)
    }
}
