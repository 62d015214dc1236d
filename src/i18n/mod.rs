//! Internationalization (i18n) module: locales, dictionaries and page metadata.
//!
//! # Architecture
//!
//! - `registry`: The supported locale set and its single default
//! - `locale`: Type-safe `Locale` handle, only obtainable from a `LocaleSet`
//! - `strings`: Static per-locale titles/descriptions and the site profile
//! - `metadata`: Startup-validated catalog that assembles `MetadataRecord`s
//! - `dictionary`: The dictionary store contract and its implementations
//! - `resolver`: Locale validation + dictionary load + metadata, per page
//! - `validator`: Dictionary completeness reports
//! - `metrics`: Routing and resolution counters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use site_locale::i18n::{LocaleSet, MetadataCatalog};
//!
//! let locales = Arc::new(LocaleSet::builtin("zh")?);
//! let catalog = MetadataCatalog::builtin(Arc::clone(&locales))?;
//! let record = catalog.build_metadata(locales.resolve_locale("ja"));
//! ```

mod dictionary;
mod locale;
mod metadata;
mod metrics;
mod registry;
mod resolver;
pub mod strings;
mod validator;

pub use dictionary::{Dictionary, DictionaryError, DictionaryStore, FsDictionaryStore, MemoryDictionaryStore};
pub use locale::Locale;
pub use metadata::{MetadataCatalog, MetadataRecord, OpenGraph, StructuredData};
pub use metrics::{MetricsReport, RoutingMetrics};
pub use registry::{default_locales, ConfigError, LocaleConfig, LocaleSet, StaticParams};
pub use resolver::{ContentResolver, PageContext};
pub use strings::{PageStrings, SiteProfile};
pub use validator::{DictionaryValidator, ValidationReport};
