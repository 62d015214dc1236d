use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Locales
    pub default_locale: String,

    // Site URLs used in canonical, Open Graph and JSON-LD fields
    pub site_url: String,
    pub app_url: String,

    // Dictionary store
    pub dictionary_dir: PathBuf,

    // Static pre-rendering
    pub prerender_out_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().with_context(|| format!("PORT is not a valid port: {}", v))?,
                Err(_) => 8080,
            },

            // Locales - must name a supported locale; checked when the set is built
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "zh".to_string()),

            // Site URLs
            site_url: trim_url(
                std::env::var("SITE_URL")
                    .unwrap_or_else(|_| "https://next-ai-drawio.jiang.jp".to_string()),
            ),
            app_url: trim_url(
                std::env::var("APP_URL")
                    .unwrap_or_else(|_| "https://diagram-ai.jiang.jp".to_string()),
            ),

            // Dictionary store
            dictionary_dir: std::env::var("DICTIONARY_DIR")
                .unwrap_or_else(|_| "dictionaries".to_string())
                .into(),

            // Static pre-rendering
            prerender_out_dir: std::env::var("PRERENDER_OUT_DIR")
                .unwrap_or_else(|_| "out".to_string())
                .into(),
        })
    }
}

/// Strip trailing slashes so paths can be appended with `format!("{}/{}")`.
fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
