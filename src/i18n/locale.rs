//! Locale type: a syntax-checked locale code.
//!
//! Locales key the values inside a translation group. Only the shape of the
//! code is checked (`en`, `es`, `pt_BR`, `zh-Hant`); whether the application
//! actually supports a locale is the host's decision.

use crate::error::{Result, TranslationError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static LOCALE_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_regex() -> &'static Regex {
    LOCALE_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2,8}(?:[-_][A-Za-z0-9]{1,8})*$").expect("locale pattern is valid")
    })
}

/// A locale code such as `"en"` or `"pt_BR"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Create a Locale from a code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is a well-formed locale code
    /// * `Err(TranslationError::InvalidLocale)` otherwise
    ///
    /// # Example
    /// ```ignore
    /// let spanish = Locale::new("es")?;
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Locale> {
        let code = code.into();
        if locale_regex().is_match(&code) {
            Ok(Locale(code))
        } else {
            Err(TranslationError::InvalidLocale(code))
        }
    }

    /// Get the locale code as written.
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl FromStr for Locale {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::new(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = TranslationError;

    fn try_from(value: String) -> Result<Self> {
        Locale::new(value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> String {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
