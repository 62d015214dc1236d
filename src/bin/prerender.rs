//! Pre-render per-locale metadata and page context for every supported locale.
//!
//! Usage: `cargo run --bin prerender [--no-validate] [OUT_DIR]`
//! OUT_DIR defaults to `PRERENDER_OUT_DIR` (or `out`).

use anyhow::Result;
use site_locale::config::Config;
use site_locale::i18n::ContentResolver;
use site_locale::prerender::prerender;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_locale=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let mut validate = true;
    let mut out_dir: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-validate" => validate = false,
            other => out_dir = Some(PathBuf::from(other)),
        }
    }
    let out_dir = out_dir.unwrap_or_else(|| config.prerender_out_dir.clone());

    let resolver = ContentResolver::from_config(&config)?;
    let summary = prerender(&resolver, &out_dir, validate).await?;

    info!(
        "✓ Pre-rendered {} locales ({} files, {} validation findings)",
        summary.locales.len(),
        summary.files_written,
        summary.validation_findings
    );

    Ok(())
}
