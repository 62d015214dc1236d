//! Per-locale page metadata assembly.
//!
//! `MetadataCatalog` joins the locale set with the static string tables once
//! at startup. A supported locale without a table entry is a configuration
//! error reported by `MetadataCatalog::new`; after that, building a record
//! for any member locale cannot fail.

use crate::i18n::{ConfigError, Locale, LocaleSet, PageStrings, SiteProfile};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Validated metadata tables for every locale in a `LocaleSet`.
#[derive(Debug, Clone)]
pub struct MetadataCatalog {
    locales: Arc<LocaleSet>,
    entries: HashMap<&'static str, CatalogEntry>,
    profile: SiteProfile,
}

#[derive(Debug, Clone, Copy)]
struct CatalogEntry {
    strings: PageStrings,
    og_locale: &'static str,
}

/// Page metadata for one locale, in the field layout the renderer expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub locale: Locale,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub authors: Vec<Author>,
    pub creator: String,
    pub publisher: String,
    pub metadata_base: String,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub robots: Robots,
    pub icons: Icons,
    pub alternates: Alternates,
    pub json_ld: StructuredData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub images: Vec<OpenGraphImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    pub google_bot: GoogleBot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GoogleBot {
    pub index: bool,
    pub follow: bool,
    pub max_video_preview: i32,
    pub max_image_preview: String,
    pub max_snippet: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icons {
    pub icon: String,
}

/// Alternate-language links, keyed by locale code.
///
/// Serialized as an object whose keys follow declaration order of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternates {
    pub languages: Vec<(Locale, String)>,
}

impl Serialize for Alternates {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        struct Languages<'a>(&'a [(Locale, String)]);

        impl Serialize for Languages<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (locale, href) in self.0 {
                    map.serialize_entry(locale.code(), href)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("languages", &Languages(&self.languages))?;
        map.end()
    }
}

/// JSON-LD `SoftwareApplication` record, emitted once per rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredData {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub application_category: String,
    pub operating_system: String,
    pub description: String,
    pub url: String,
    pub in_language: Locale,
    pub offers: Offer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: String,
    pub price: String,
    pub price_currency: String,
}

impl StructuredData {
    /// Serialize for embedding in a `<script type="application/ld+json">` tag.
    ///
    /// `<` is escaped so the payload cannot close the surrounding script.
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)?.replace('<', "\\u003c"))
    }
}

impl MetadataCatalog {
    /// Join a locale set with its metadata tables, failing on any gap.
    ///
    /// # Arguments
    /// * `locales` - The supported locale set
    /// * `strings` - Title/description table; extra entries are ignored
    /// * `profile` - Site-wide, locale-independent values
    pub fn new(
        locales: Arc<LocaleSet>,
        strings: &[PageStrings],
        profile: SiteProfile,
    ) -> Result<Self, ConfigError> {
        let mut entries = HashMap::with_capacity(locales.len());

        for locale in locales.iter() {
            let page = strings
                .iter()
                .find(|s| s.code == locale.code())
                .copied()
                .ok_or_else(|| missing(locale, "page strings"))?;
            if page.title.is_empty() {
                return Err(missing(locale, "title"));
            }
            if page.description.is_empty() {
                return Err(missing(locale, "description"));
            }

            let og_locale = locales
                .config(locale)
                .map(|config| config.og_locale)
                .filter(|code| !code.is_empty())
                .ok_or_else(|| missing(locale, "Open Graph locale"))?;

            entries.insert(
                locale.code(),
                CatalogEntry {
                    strings: page,
                    og_locale,
                },
            );
        }

        debug!("Metadata catalog validated for {} locales", entries.len());

        Ok(Self {
            locales,
            entries,
            profile,
        })
    }

    /// The built-in tables for the given set.
    pub fn builtin(locales: Arc<LocaleSet>) -> Result<Self, ConfigError> {
        Self::new(
            locales,
            crate::i18n::strings::PAGE_STRINGS,
            crate::i18n::strings::SITE_PROFILE,
        )
    }

    /// Override the site profile (e.g., base URLs from configuration).
    pub fn with_profile(mut self, profile: SiteProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Assemble the metadata record for a locale.
    ///
    /// Deterministic: the same locale always yields an equal record.
    pub fn build_metadata(&self, locale: Locale) -> MetadataRecord {
        // Foreign locales are mapped onto this set first.
        let locale = self.locales.resolve_locale(locale.code());
        // Every member has an entry; `new` refuses to build otherwise.
        let entry = &self.entries[locale.code()];
        let profile = &self.profile;
        let title = entry.strings.title.to_string();
        let description = entry.strings.description.to_string();
        let image_url = profile.image_path.to_string();

        MetadataRecord {
            locale,
            title: title.clone(),
            description: description.clone(),
            keywords: profile.keywords.iter().map(|k| k.to_string()).collect(),
            authors: vec![Author {
                name: profile.app_name.to_string(),
            }],
            creator: profile.app_name.to_string(),
            publisher: profile.app_name.to_string(),
            metadata_base: profile.base_url.to_string(),
            canonical_url: format!("{}/{}", profile.base_url, locale.code()),
            open_graph: OpenGraph {
                title: title.clone(),
                description: description.clone(),
                kind: "website".to_string(),
                url: profile.base_url.to_string(),
                site_name: profile.site_name.to_string(),
                locale: entry.og_locale.to_string(),
                images: vec![OpenGraphImage {
                    url: image_url.clone(),
                    width: profile.image_width,
                    height: profile.image_height,
                    alt: profile.image_alt.to_string(),
                }],
            },
            twitter: TwitterCard {
                card: "summary_large_image".to_string(),
                title,
                description,
                images: vec![image_url],
            },
            robots: Robots {
                index: true,
                follow: true,
                google_bot: GoogleBot {
                    index: true,
                    follow: true,
                    max_video_preview: -1,
                    max_image_preview: "large".to_string(),
                    max_snippet: -1,
                },
            },
            icons: Icons {
                icon: profile.favicon_path.to_string(),
            },
            alternates: Alternates {
                languages: self
                    .locales
                    .iter()
                    .map(|l| (l, l.path_prefix()))
                    .collect(),
            },
            json_ld: self.structured_data(locale),
        }
    }

    /// The JSON-LD record for a locale.
    pub fn structured_data(&self, locale: Locale) -> StructuredData {
        let profile = &self.profile;
        StructuredData {
            context: "https://schema.org".to_string(),
            kind: "SoftwareApplication".to_string(),
            name: profile.app_name.to_string(),
            application_category: profile.application_category.to_string(),
            operating_system: profile.operating_system.to_string(),
            description: profile.application_description.to_string(),
            url: profile.app_url.to_string(),
            in_language: self.locales.resolve_locale(locale.code()),
            offers: Offer {
                kind: "Offer".to_string(),
                price: profile.price.to_string(),
                price_currency: profile.price_currency.to_string(),
            },
        }
    }
}

fn missing(locale: Locale, table: &'static str) -> ConfigError {
    ConfigError::MissingMetadata {
        locale: locale.code().to_string(),
        table,
    }
}
