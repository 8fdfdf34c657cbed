//! Translation groups and the per-entity group cache.

use crate::attribute::GroupId;
use crate::error::Result;
use crate::i18n::{Locale, TranslationMetrics};
use crate::table::TranslationSource;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// All locale values of one translatable field of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationGroup {
    id: GroupId,
    values: BTreeMap<Locale, String>,

    /// Locales written or removed since the group was loaded or last saved
    #[serde(skip)]
    dirty: BTreeSet<Locale>,
}

impl TranslationGroup {
    /// An empty group for `id`.
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
            dirty: BTreeSet::new(),
        }
    }

    /// A clean group holding existing values (e.g. loaded from a side table).
    pub fn with_values<I>(id: GroupId, values: I) -> Self
    where
        I: IntoIterator<Item = (Locale, String)>,
    {
        Self {
            id,
            values: values.into_iter().collect(),
            dirty: BTreeSet::new(),
        }
    }

    /// The group id the owning field's `_F` column holds.
    pub fn id(&self) -> &GroupId {
        &self.id
    }

    /// The value in exactly `locale`.
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        self.values.get(locale).map(String::as_str)
    }

    /// The value in `locale`, else in `fallback`, else nothing.
    pub fn in_locale(&self, locale: &Locale, fallback: &Locale) -> Option<&str> {
        self.get(locale).or_else(|| self.get(fallback))
    }

    /// Store `value` for `locale`, replacing any previous value.
    ///
    /// The locale is remembered as dirty until the next save.
    pub fn set(&mut self, locale: Locale, value: impl Into<String>) {
        self.dirty.insert(locale.clone());
        self.values.insert(locale, value.into());
    }

    /// Drop the value for `locale`, returning it if there was one.
    pub fn remove(&mut self, locale: &Locale) -> Option<String> {
        let removed = self.values.remove(locale);
        if removed.is_some() {
            self.dirty.insert(locale.clone());
        }
        removed
    }

    /// Locales that have a value, in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.values.keys()
    }

    /// `(locale, value)` pairs in locale order.
    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &str)> {
        self.values
            .iter()
            .map(|(locale, value)| (locale, value.as_str()))
    }

    /// Number of locales with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no locale has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether any locale changed since the group was loaded or saved.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Locales written or removed since the last save.
    pub fn dirty_locales(&self) -> impl Iterator<Item = &Locale> {
        self.dirty.iter()
    }

    /// Forget pending changes, typically after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty.clear();
    }
}

/// Groups opened by one entity, keyed by group id.
///
/// Populated lazily and never evicted. With a source attached, a group is
/// loaded from it on first open; otherwise it starts empty.
#[derive(Default)]
pub struct GroupCache {
    groups: HashMap<GroupId, TranslationGroup>,
    source: Option<Arc<dyn TranslationSource>>,
}

impl GroupCache {
    /// An empty cache with no source; groups start empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cache that loads groups from `source`.
    pub fn with_source(source: Arc<dyn TranslationSource>) -> Self {
        Self {
            groups: HashMap::new(),
            source: Some(source),
        }
    }

    /// Attach or replace the source used for loading and flushing.
    pub fn set_source(&mut self, source: Arc<dyn TranslationSource>) {
        self.source = Some(source);
    }

    /// The cached group for `id`, constructing and caching it on first use.
    pub fn open(&mut self, id: &GroupId) -> Result<&mut TranslationGroup> {
        let metrics = TranslationMetrics::global();
        match self.groups.entry(id.clone()) {
            Entry::Occupied(entry) => {
                metrics.record_cache_hit();
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                metrics.record_cache_miss();
                let group = match &self.source {
                    Some(source) => {
                        debug!("Loading translation group {}", id);
                        source.load_group(id)?
                    }
                    None => {
                        debug!("Creating empty translation group {}", id);
                        TranslationGroup::new(id.clone())
                    }
                };
                Ok(entry.insert(group))
            }
        }
    }

    /// The group for `id` if it has been opened. Never loads.
    pub fn get(&self, id: &GroupId) -> Option<&TranslationGroup> {
        self.groups.get(id)
    }

    /// Whether the group for `id` has been opened.
    pub fn contains(&self, id: &GroupId) -> bool {
        self.groups.contains_key(id)
    }

    /// Number of opened groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group has been opened yet.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Write every dirty group to the source and mark it clean.
    ///
    /// Returns the number of groups written. Without a source nothing is
    /// written and groups stay dirty.
    pub fn flush(&mut self) -> Result<usize> {
        let Some(source) = &self.source else {
            return Ok(0);
        };

        let mut written = 0;
        for group in self.groups.values_mut().filter(|group| group.is_dirty()) {
            source.save_group(group)?;
            group.mark_clean();
            written += 1;
        }

        if written > 0 {
            info!("Saved {} translation group(s)", written);
        }
        Ok(written)
    }
}

impl std::fmt::Debug for GroupCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupCache")
            .field("groups", &self.groups)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}
