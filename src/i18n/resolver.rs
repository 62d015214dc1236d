//! Locale content resolver: locale validation, dictionary load and
//! metadata assembly for one page or build target.

use crate::config::Config;
use crate::i18n::{
    Dictionary, DictionaryError, DictionaryStore, FsDictionaryStore, Locale, LocaleSet,
    MetadataCatalog, MetadataRecord,
};
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything the renderer needs for one locale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub locale: Locale,

    /// True when the requested locale was unsupported and the default was used
    pub fallback_applied: bool,

    pub metadata: MetadataRecord,
    pub dictionary: Dictionary,
}

/// Resolves per-locale content against a shared locale set and catalog.
pub struct ContentResolver<S> {
    locales: Arc<LocaleSet>,
    catalog: Arc<MetadataCatalog>,
    store: S,
}

impl ContentResolver<FsDictionaryStore> {
    /// Build the resolver from configuration, validating all locale tables.
    ///
    /// Fails fast on an unsupported default locale or a metadata gap.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let locales = Arc::new(
            LocaleSet::builtin(&config.default_locale).context("Invalid DEFAULT_LOCALE")?,
        );
        let profile = crate::i18n::strings::SITE_PROFILE
            .with_urls(config.site_url.as_str(), config.app_url.as_str());
        let catalog = MetadataCatalog::builtin(Arc::clone(&locales))
            .context("Metadata tables do not cover every supported locale")?
            .with_profile(profile);

        Ok(Self::new(
            locales,
            Arc::new(catalog),
            FsDictionaryStore::new(&config.dictionary_dir),
        ))
    }
}

impl<S: DictionaryStore> ContentResolver<S> {
    pub fn new(locales: Arc<LocaleSet>, catalog: Arc<MetadataCatalog>, store: S) -> Self {
        Self {
            locales,
            catalog,
            store,
        }
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// The shared locale set, for components that must agree with this resolver.
    pub fn shared_locales(&self) -> Arc<LocaleSet> {
        Arc::clone(&self.locales)
    }

    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a requested locale, falling back to the default.
    pub fn resolve_locale(&self, requested: &str) -> Locale {
        let locale = self.locales.resolve_locale(requested);
        if locale.code() != requested {
            debug!(
                "Locale '{}' not supported, falling back to '{}'",
                requested, locale
            );
        }
        locale
    }

    /// Load the dictionary for a locale from the external store.
    ///
    /// Store errors are returned unchanged.
    pub async fn load_dictionary(&self, locale: Locale) -> Result<Dictionary, DictionaryError> {
        self.store.load(locale).await
    }

    /// Metadata for a requested locale, with default-locale fallback.
    pub fn build_metadata(&self, requested: &str) -> MetadataRecord {
        self.catalog.build_metadata(self.resolve_locale(requested))
    }

    /// One build target per supported locale, in declaration order.
    pub fn enumerate_locales(&self) -> Vec<Locale> {
        self.locales.enumerate_locales()
    }

    /// Resolve a full page context for an already-validated locale.
    pub async fn page_for(&self, locale: Locale) -> Result<PageContext, DictionaryError> {
        let dictionary = self.load_dictionary(locale).await.map_err(|e| {
            warn!("Dictionary load failed for '{}': {}", locale, e);
            e
        })?;

        Ok(PageContext {
            locale,
            fallback_applied: false,
            metadata: self.catalog.build_metadata(locale),
            dictionary,
        })
    }

    /// Resolve a full page context, substituting the default locale when the
    /// requested one is unsupported.
    pub async fn resolve_page(&self, requested: &str) -> Result<PageContext, DictionaryError> {
        let locale = self.resolve_locale(requested);
        let mut page = self.page_for(locale).await?;
        page.fallback_applied = locale.code() != requested;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::MemoryDictionaryStore;
    use proptest::prelude::*;

    fn resolver(default: &str) -> ContentResolver<MemoryDictionaryStore> {
        let locales = Arc::new(LocaleSet::builtin(default).unwrap());
        let catalog = Arc::new(MetadataCatalog::builtin(Arc::clone(&locales)).unwrap());
        let store = MemoryDictionaryStore::new()
            .with("en", [("save", "Save")].into_iter().collect())
            .with("zh", [("save", "保存")].into_iter().collect());
        ContentResolver::new(locales, catalog, store)
    }

    // ==================== Locale Resolution Tests ====================

    #[test]
    fn test_resolve_locale_member_unchanged() {
        assert_eq!(resolver("en").resolve_locale("zh").code(), "zh");
    }

    #[test]
    fn test_resolve_locale_unknown_uses_default() {
        assert_eq!(resolver("en").resolve_locale("fr").code(), "en");
    }

    #[test]
    fn test_build_metadata_falls_back() {
        let resolver = resolver("en");
        let record = resolver.build_metadata("fr");
        assert_eq!(record.locale.code(), "en");
        assert_eq!(record.open_graph.locale, "en_US");
    }

    #[test]
    fn test_enumerate_locales_in_order() {
        let codes: Vec<_> = resolver("zh")
            .enumerate_locales()
            .iter()
            .map(|l| l.code())
            .collect();
        assert_eq!(codes, vec!["en", "zh", "ja"]);
    }

    // ==================== Page Resolution Tests ====================

    #[tokio::test]
    async fn test_resolve_page_supported_locale() {
        let page = resolver("en").resolve_page("zh").await.unwrap();
        assert_eq!(page.locale.code(), "zh");
        assert!(!page.fallback_applied);
        assert_eq!(page.dictionary.get("save"), Some("保存"));
        assert_eq!(page.metadata.json_ld.in_language.code(), "zh");
    }

    #[tokio::test]
    async fn test_resolve_page_unknown_locale_falls_back() {
        let page = resolver("en").resolve_page("fr").await.unwrap();
        assert_eq!(page.locale.code(), "en");
        assert!(page.fallback_applied);
        assert_eq!(page.dictionary.get("save"), Some("Save"));
    }

    #[tokio::test]
    async fn test_dictionary_error_propagates_unchanged() {
        // "ja" is supported but the store has no dictionary for it
        let err = resolver("en").resolve_page("ja").await.unwrap_err();
        assert!(matches!(err, DictionaryError::NotFound(code) if code == "ja"));
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_metadata_always_for_member(requested in "[a-z]{0,3}") {
            let resolver = resolver("en");
            let record = resolver.build_metadata(&requested);
            prop_assert!(resolver.locales().contains(record.locale.code()));
            prop_assert!(!record.title.is_empty());
        }
    }
}
