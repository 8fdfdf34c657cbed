//! Internationalization (i18n) module: locales and where they come from.
//!
//! # Architecture
//!
//! - `locale`: syntax-checked `Locale` codes that key translation values
//! - `provider`: `LocaleProvider` hooks handing entities the current and fallback locale
//! - `metrics`: translation cache and fallback counters
//!
//! # Example
//!
//! ```rust,ignore
//! use translatable_fields::i18n::{FixedLocales, Locale, LocaleProvider};
//!
//! let locales = FixedLocales::new(Locale::new("es")?, Locale::new("en")?);
//! assert_eq!(locales.current_locale().code(), "es");
//! ```

mod locale;
mod metrics;
mod provider;

pub use locale::Locale;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use provider::{FixedLocales, LocaleFn, LocaleProvider};
