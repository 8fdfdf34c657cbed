//! Application configuration loaded from environment variables.

use crate::i18n::{Locale, LocaleProvider};
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Locale translated fields are read and written in
    pub locale: Locale,

    /// Locale read when `locale` has no value
    pub fallback_locale: Locale,
}

impl Config {
    /// Read `APP_LOCALE` and `APP_FALLBACK_LOCALE`, both defaulting to `en`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            locale: parse_locale_var("APP_LOCALE")?,
            fallback_locale: parse_locale_var("APP_FALLBACK_LOCALE")?,
        })
    }
}

/// Read a locale from the environment, defaulting to English.
fn parse_locale_var(name: &str) -> Result<Locale> {
    let code = std::env::var(name).unwrap_or_else(|_| "en".to_string());
    Locale::new(code.trim()).with_context(|| format!("{} is not a valid locale", name))
}

impl LocaleProvider for Config {
    fn current_locale(&self) -> Locale {
        self.locale.clone()
    }

    fn fallback_locale(&self) -> Locale {
        self.fallback_locale.clone()
    }
}
