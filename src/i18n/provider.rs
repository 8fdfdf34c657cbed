//! Locale hooks: where an entity learns the active and fallback locales.
//!
//! Entities never look up a global application locale. They are handed a
//! `LocaleProvider` at construction and ask it on every translated read/write.

use crate::i18n::Locale;
use std::rc::Rc;
use std::sync::Arc;

/// Supplies the locale to read/write in and the locale to fall back to.
pub trait LocaleProvider {
    /// The active request/session locale.
    fn current_locale(&self) -> Locale;

    /// The application default, used when the current locale has no value.
    fn fallback_locale(&self) -> Locale;
}

impl<P: LocaleProvider + ?Sized> LocaleProvider for &P {
    fn current_locale(&self) -> Locale {
        (**self).current_locale()
    }

    fn fallback_locale(&self) -> Locale {
        (**self).fallback_locale()
    }
}

impl<P: LocaleProvider + ?Sized> LocaleProvider for Rc<P> {
    fn current_locale(&self) -> Locale {
        (**self).current_locale()
    }

    fn fallback_locale(&self) -> Locale {
        (**self).fallback_locale()
    }
}

impl<P: LocaleProvider + ?Sized> LocaleProvider for Arc<P> {
    fn current_locale(&self) -> Locale {
        (**self).current_locale()
    }

    fn fallback_locale(&self) -> Locale {
        (**self).fallback_locale()
    }
}

/// A fixed pair of locales. The current locale can be switched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocales {
    current: Locale,
    fallback: Locale,
}

impl FixedLocales {
    pub fn new(current: Locale, fallback: Locale) -> Self {
        Self { current, fallback }
    }

    /// Use one locale for both current and fallback.
    pub fn single(locale: Locale) -> Self {
        Self {
            current: locale.clone(),
            fallback: locale,
        }
    }

    /// Switch the current locale (e.g. per request).
    pub fn set_current(&mut self, locale: Locale) {
        self.current = locale;
    }

    /// Builder form of `set_current`.
    pub fn with_current(mut self, locale: Locale) -> Self {
        self.current = locale;
        self
    }
}

impl LocaleProvider for FixedLocales {
    fn current_locale(&self) -> Locale {
        self.current.clone()
    }

    fn fallback_locale(&self) -> Locale {
        self.fallback.clone()
    }
}

/// Current locale computed by a closure, fallback fixed at construction.
pub struct LocaleFn<F> {
    current: F,
    fallback: Locale,
}

impl<F> LocaleFn<F>
where
    F: Fn() -> Locale,
{
    pub fn new(current: F, fallback: Locale) -> Self {
        Self { current, fallback }
    }
}

impl<F> LocaleProvider for LocaleFn<F>
where
    F: Fn() -> Locale,
{
    fn current_locale(&self) -> Locale {
        (self.current)()
    }

    fn fallback_locale(&self) -> Locale {
        self.fallback.clone()
    }
}

impl<F> std::fmt::Debug for LocaleFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleFn")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
