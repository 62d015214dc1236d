//! Static pre-rendering: one output directory per enumerated locale.
//!
//! Output layout under the target directory:
//!
//! ```text
//! static-params.json        [{"lang":"en"},{"lang":"zh"},...]
//! {code}/metadata.json      MetadataRecord
//! {code}/page.json          PageContext (metadata + dictionary)
//! ```

use crate::i18n::{ContentResolver, DictionaryStore, DictionaryValidator, Locale, PageContext};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// What a pre-render run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrerenderSummary {
    /// Locales rendered, in declaration order
    pub locales: Vec<Locale>,

    /// Number of JSON files written
    pub files_written: usize,

    /// Dictionary validation findings (errors + warnings) across all locales
    pub validation_findings: usize,
}

/// Render every supported locale into `out_dir`.
///
/// Dictionaries are loaded concurrently; any load failure aborts the run
/// before anything is written.
pub async fn prerender<S: DictionaryStore>(
    resolver: &ContentResolver<S>,
    out_dir: &Path,
    validate: bool,
) -> Result<PrerenderSummary> {
    let targets = resolver.enumerate_locales();
    info!("Pre-rendering {} locales into {}", targets.len(), out_dir.display());

    let pages = try_join_all(targets.iter().map(|locale| async move {
        resolver
            .page_for(*locale)
            .await
            .with_context(|| format!("Failed to load dictionary for '{}'", locale))
    }))
    .await?;

    let validation_findings = if validate {
        validate_dictionaries(resolver, &pages)
    } else {
        0
    };

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    write_json(
        &out_dir.join("static-params.json"),
        &resolver.locales().static_params(),
    )
    .await?;
    let mut files_written = 1;

    for page in &pages {
        let dir = out_dir.join(page.locale.code());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        write_json(&dir.join("metadata.json"), &page.metadata).await?;
        write_json(&dir.join("page.json"), page).await?;
        files_written += 2;

        info!("✓ Rendered {} ({} dictionary entries)", page.locale, page.dictionary.len());
    }

    Ok(PrerenderSummary {
        locales: targets,
        files_written,
        validation_findings,
    })
}

/// Compare each dictionary against the default locale's, logging findings.
fn validate_dictionaries<S: DictionaryStore>(
    resolver: &ContentResolver<S>,
    pages: &[PageContext],
) -> usize {
    let default = resolver.locales().default_locale();
    let Some(reference) = pages.iter().find(|page| page.locale == default) else {
        return 0;
    };

    let mut findings = 0;
    for page in pages.iter().filter(|page| page.locale != default) {
        let report = DictionaryValidator::compare(&reference.dictionary, &page.dictionary);
        for message in report.errors.iter().chain(report.warnings.iter()) {
            warn!("[{}] {}", page.locale, message);
        }
        findings += report.errors.len() + report.warnings.len();
    }
    findings
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
