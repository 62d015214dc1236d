//! Locale registry: the supported-locale set and its single default.
//!
//! The set is built once at startup and shared by reference (usually behind
//! an `Arc`) with both the request router and the content resolver, so the
//! two always agree on which locale is the fallback.

use crate::i18n::Locale;
use serde::Serialize;
use thiserror::Error;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Locale tag, also the URL path prefix (e.g., "en", "zh")
    pub code: &'static str,

    /// English name of the language (e.g., "Chinese")
    pub name: &'static str,

    /// Native name of the language (e.g., "中文")
    pub native_name: &'static str,

    /// Open Graph locale code (e.g., "zh_CN")
    pub og_locale: &'static str,
}

/// Errors found while validating static locale configuration at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("locale set must contain at least one locale")]
    EmptyLocaleSet,

    #[error("invalid locale code '{0}': must be non-empty and must not contain '/'")]
    InvalidLocaleCode(String),

    #[error("locale '{0}' is declared more than once")]
    DuplicateLocale(String),

    #[error("default locale '{0}' is not in the supported locale set")]
    UnknownDefaultLocale(String),

    #[error("locale '{locale}' has no {table} metadata entry")]
    MissingMetadata { locale: String, table: &'static str },
}

/// One static pre-render target, shaped like the `[lang]` route parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticParams {
    pub lang: Locale,
}

/// Ordered, duplicate-free set of supported locales with one default.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: Vec<LocaleConfig>,
    default: Locale,
}

impl LocaleSet {
    /// Build and validate a locale set.
    ///
    /// # Arguments
    /// * `locales` - Locale configurations in declaration order
    /// * `default_code` - Code of the fallback locale; must be a member
    pub fn new(locales: Vec<LocaleConfig>, default_code: &str) -> Result<Self, ConfigError> {
        if locales.is_empty() {
            return Err(ConfigError::EmptyLocaleSet);
        }

        for (i, config) in locales.iter().enumerate() {
            if config.code.is_empty() || config.code.contains('/') {
                return Err(ConfigError::InvalidLocaleCode(config.code.to_string()));
            }
            if locales[..i].iter().any(|prev| prev.code == config.code) {
                return Err(ConfigError::DuplicateLocale(config.code.to_string()));
            }
        }

        let default = locales
            .iter()
            .find(|config| config.code == default_code)
            .map(|config| Locale::new(config.code))
            .ok_or_else(|| ConfigError::UnknownDefaultLocale(default_code.to_string()))?;

        Ok(Self { locales, default })
    }

    /// The built-in set (en, zh, ja) with the given default.
    pub fn builtin(default_code: &str) -> Result<Self, ConfigError> {
        Self::new(default_locales(), default_code)
    }

    /// Check whether a code names a supported locale (exact, case-sensitive).
    pub fn contains(&self, code: &str) -> bool {
        self.locales.iter().any(|config| config.code == code)
    }

    /// Get the locale for a code, if supported.
    pub fn get(&self, code: &str) -> Option<Locale> {
        self.locales
            .iter()
            .find(|config| config.code == code)
            .map(|config| Locale::new(config.code))
    }

    /// The single fallback locale shared by routing and content resolution.
    pub fn default_locale(&self) -> Locale {
        self.default
    }

    /// Iterate supported locales in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Locale> + '_ {
        self.locales.iter().map(|config| Locale::new(config.code))
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Get the full configuration for a locale.
    ///
    /// Returns `None` only when the locale came from a different set.
    pub fn config(&self, locale: Locale) -> Option<&LocaleConfig> {
        self.locales.iter().find(|config| config.code == locale.code())
    }

    /// Validate a requested locale, substituting the default when unsupported.
    ///
    /// Total and idempotent: the result is always a member of the set.
    pub fn resolve_locale(&self, requested: &str) -> Locale {
        self.get(requested).unwrap_or(self.default)
    }

    /// One build target per supported locale, in declaration order.
    pub fn enumerate_locales(&self) -> Vec<Locale> {
        self.iter().collect()
    }

    /// Build targets in the `{ lang }` shape consumed by static pre-rendering.
    pub fn static_params(&self) -> Vec<StaticParams> {
        self.iter().map(|lang| StaticParams { lang }).collect()
    }
}

/// Built-in locale configurations, in declaration order.
pub fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            og_locale: "en_US",
        },
        LocaleConfig {
            code: "zh",
            name: "Chinese",
            native_name: "中文",
            og_locale: "zh_CN",
        },
        LocaleConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            og_locale: "ja_JP",
        },
    ]
}
