//! Translation side table: per-locale rows backing translation groups.

use crate::attribute::GroupId;
use crate::error::{Result, TranslationError};
use crate::group::TranslationGroup;
use crate::i18n::Locale;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Where translation groups are loaded from and saved to.
pub trait TranslationSource: Send + Sync {
    /// Load every locale value stored for `id`. Unknown ids yield an empty group.
    fn load_group(&self, id: &GroupId) -> Result<TranslationGroup>;

    /// Persist the locales of `group` that changed since it was loaded.
    fn save_group(&self, group: &TranslationGroup) -> Result<()>;
}

/// One stored translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    pub group_id: GroupId,
    pub locale: Locale,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

type Rows = BTreeMap<(GroupId, Locale), TranslationRow>;

#[derive(Debug, Default)]
struct TableState {
    rows: Rows,

    /// Highest integer id handed out by `reserve_group_id`
    last_reserved: i64,
}

/// In-process translation table shared between entities.
///
/// Clones share the same rows and the same id reservations.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    state: Arc<Mutex<TableState>>,
}

impl TranslationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, TableState>> {
        self.state.lock().map_err(|_| TranslationError::LockPoisoned)
    }

    /// Insert or replace the value of `group_id` in `locale`.
    pub fn insert(&self, group_id: GroupId, locale: Locale, value: impl Into<String>) -> Result<()> {
        let mut state = self.lock()?;
        let row = TranslationRow {
            group_id: group_id.clone(),
            locale: locale.clone(),
            value: value.into(),
            updated_at: Utc::now(),
        };
        state.rows.insert((group_id, locale), row);
        Ok(())
    }

    /// The stored value of `group_id` in exactly `locale`.
    pub fn value(&self, group_id: &GroupId, locale: &Locale) -> Result<Option<String>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .get(&(group_id.clone(), locale.clone()))
            .map(|row| row.value.clone()))
    }

    /// All rows of one group, ordered by locale.
    pub fn rows(&self, group_id: &GroupId) -> Result<Vec<TranslationRow>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .values()
            .filter(|row| &row.group_id == group_id)
            .cloned()
            .collect())
    }

    /// Number of distinct groups with at least one row.
    pub fn group_count(&self) -> Result<usize> {
        let state = self.lock()?;
        let mut count = 0;
        let mut last: Option<&GroupId> = None;
        for (group_id, _) in state.rows.keys() {
            if last != Some(group_id) {
                count += 1;
                last = Some(group_id);
            }
        }
        Ok(count)
    }

    /// Total number of stored translations.
    pub fn row_count(&self) -> Result<usize> {
        Ok(self.lock()?.rows.len())
    }

    /// Reserve a fresh integer group id for a new translatable field.
    ///
    /// Ids are one past the largest integer id either stored or reserved
    /// earlier, so two unsaved records never share a group.
    pub fn reserve_group_id(&self) -> Result<GroupId> {
        let mut state = self.lock()?;
        let stored = state
            .rows
            .keys()
            .filter_map(|(group_id, _)| match group_id {
                GroupId::Int(id) => Some(*id),
                GroupId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        let next = stored
            .max(state.last_reserved)
            .checked_add(1)
            .ok_or(TranslationError::GroupIdsExhausted)?;
        state.last_reserved = next;
        Ok(GroupId::Int(next))
    }
}

impl TranslationSource for TranslationTable {
    fn load_group(&self, id: &GroupId) -> Result<TranslationGroup> {
        let values = self
            .rows(id)?
            .into_iter()
            .map(|row| (row.locale, row.value));
        Ok(TranslationGroup::with_values(id.clone(), values))
    }

    fn save_group(&self, group: &TranslationGroup) -> Result<()> {
        let mut state = self.lock()?;
        let now = Utc::now();

        for locale in group.dirty_locales() {
            let key = (group.id().clone(), locale.clone());
            match group.get(locale) {
                Some(value) => {
                    state.rows.insert(
                        key,
                        TranslationRow {
                            group_id: group.id().clone(),
                            locale: locale.clone(),
                            value: value.to_string(),
                            updated_at: now,
                        },
                    );
                }
                None => {
                    state.rows.remove(&key);
                }
            }
        }
        Ok(())
    }
}
