//! Per-locale field translation for persisted entities.
//!
//! A translatable field `name` is marked in the raw row by a `_name` column
//! holding a translation group id. Reading `name` resolves the value in the
//! current locale (falling back to the default locale), writing it updates the
//! current locale's value, and reading `_name` hands back the whole group.

pub mod attribute;
pub mod config;
pub mod entity;
pub mod error;
pub mod group;
pub mod i18n;
pub mod table;
pub mod translatable;

pub use attribute::{Attribute, AttributeStore, GroupId};
pub use entity::{Entity, FieldValue};
pub use error::{Result, TranslationError};
pub use group::{GroupCache, TranslationGroup};
pub use i18n::{FixedLocales, Locale, LocaleFn, LocaleProvider};
pub use table::{TranslationRow, TranslationSource, TranslationTable};
pub use translatable::{Interception, Translatable};
