//! Dictionary store contract and the two stores shipped with the crate.
//!
//! The resolver only needs `DictionaryStore::load`. Completeness of a
//! dictionary is the store's concern; see `DictionaryValidator` for an
//! offline report.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Translated strings for one locale. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(BTreeMap<String, String>);

impl Dictionary {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Failures reported by a dictionary store.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("no dictionary for locale '{0}'")]
    NotFound(String),

    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dictionary {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-locale key/value text store.
///
/// Loads are independent and idempotent; callers may issue them
/// concurrently and repeat them freely.
pub trait DictionaryStore: Send + Sync {
    fn load(&self, locale: Locale)
        -> impl Future<Output = Result<Dictionary, DictionaryError>> + Send;
}

/// Reads `{dir}/{code}.json`, a flat JSON object of string to string.
#[derive(Debug, Clone)]
pub struct FsDictionaryStore {
    dir: PathBuf,
}

impl FsDictionaryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, locale: Locale) -> PathBuf {
        self.dir.join(format!("{}.json", locale.code()))
    }
}

impl DictionaryStore for FsDictionaryStore {
    async fn load(&self, locale: Locale) -> Result<Dictionary, DictionaryError> {
        let path = self.path_for(locale);
        debug!("Loading dictionary {}", path.display());

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DictionaryError::NotFound(locale.code().to_string()));
            }
            Err(source) => return Err(DictionaryError::Io { path, source }),
        };

        serde_json::from_slice(&bytes).map_err(|source| DictionaryError::Parse { path, source })
    }
}

/// Fixed in-memory dictionaries keyed by locale code.
#[derive(Debug, Clone, Default)]
pub struct MemoryDictionaryStore {
    dictionaries: HashMap<String, Dictionary>,
}

impl MemoryDictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: impl Into<String>, dictionary: Dictionary) -> Self {
        self.dictionaries.insert(code.into(), dictionary);
        self
    }
}

impl DictionaryStore for MemoryDictionaryStore {
    async fn load(&self, locale: Locale) -> Result<Dictionary, DictionaryError> {
        self.dictionaries
            .get(locale.code())
            .cloned()
            .ok_or_else(|| DictionaryError::NotFound(locale.code().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn zh() -> Locale {
        Locale::new("zh")
    }

    // ==================== Dictionary Tests ====================

    #[test]
    fn test_dictionary_from_pairs() {
        let dict: Dictionary = [("greeting", "你好"), ("farewell", "再见")].into_iter().collect();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("greeting"), Some("你好"));
        assert_eq!(dict.get("missing"), None);
    }

    #[test]
    fn test_dictionary_keys_sorted() {
        let dict: Dictionary = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    // ==================== FsDictionaryStore Tests ====================

    #[tokio::test]
    async fn test_fs_store_loads_json_object() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("zh.json"), r#"{"title":"图表","save":"保存"}"#).unwrap();

        let store = FsDictionaryStore::new(dir.path());
        let dict = store.load(zh()).await.unwrap();
        assert_eq!(dict.get("title"), Some("图表"));
        assert_eq!(dict.len(), 2);
    }

    #[tokio::test]
    async fn test_fs_store_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FsDictionaryStore::new(dir.path());
        let err = store.load(zh()).await.unwrap_err();
        assert!(matches!(err, DictionaryError::NotFound(code) if code == "zh"));
    }

    #[tokio::test]
    async fn test_fs_store_rejects_non_string_values() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("zh.json"), r#"{"count": 3}"#).unwrap();

        let store = FsDictionaryStore::new(dir.path());
        let err = store.load(zh()).await.unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));
        assert!(err.to_string().contains("zh.json"));
    }

    #[tokio::test]
    async fn test_fs_store_load_is_repeatable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("zh.json"), r#"{"k":"v"}"#).unwrap();

        let store = FsDictionaryStore::new(dir.path());
        let first = store.load(zh()).await.unwrap();
        let second = store.load(zh()).await.unwrap();
        assert_eq!(first, second);
    }

    // ==================== MemoryDictionaryStore Tests ====================

    #[tokio::test]
    async fn test_memory_store_hit_and_miss() {
        let store = MemoryDictionaryStore::new()
            .with("zh", [("k", "v")].into_iter().collect());

        assert_eq!(store.load(zh()).await.unwrap().get("k"), Some("v"));
        assert!(store.load(Locale::new("ja")).await.is_err());
    }
}
