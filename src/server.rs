//! HTTP surface: locale redirect middleware plus page and API handlers.

use crate::config::Config;
use crate::i18n::{
    ContentResolver, DictionaryError, DictionaryStore, FsDictionaryStore, MetadataRecord,
    MetricsReport, PageContext, RoutingMetrics, StaticParams,
};
use crate::router::{ExclusionPolicy, LocaleRouter, RedirectDecision};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Shared, immutable application state.
pub struct AppState<S = FsDictionaryStore> {
    pub router: LocaleRouter,
    pub resolver: ContentResolver<S>,
    pub metrics: RoutingMetrics,
}

impl AppState<FsDictionaryStore> {
    /// Build the state from configuration, validating all locale tables.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ContentResolver::from_config(config)?))
    }
}

impl<S: DictionaryStore> AppState<S> {
    /// The router shares the resolver's locale set, so both use one default.
    pub fn new(resolver: ContentResolver<S>) -> Self {
        Self {
            router: LocaleRouter::new(resolver.shared_locales(), ExclusionPolicy::default()),
            resolver,
            metrics: RoutingMetrics::new(),
        }
    }
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unsupported locale '{0}'")]
    UnknownLocale(String),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownLocale(_) => StatusCode::NOT_FOUND,
            ApiError::Dictionary(DictionaryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Dictionary(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the axum router with the locale redirect middleware on every route.
pub fn app<S>(state: Arc<AppState<S>>) -> Router
where
    S: DictionaryStore + 'static,
{
    Router::new()
        .route("/api/health", get(health))
        .route("/api/locales", get(static_params::<S>))
        .route("/api/metadata/:lang", get(metadata::<S>))
        .route("/api/metrics", get(metrics::<S>))
        .route("/:lang", get(page::<S>))
        .route("/:lang/", get(page::<S>))
        .route("/:lang/*rest", get(page_nested::<S>))
        // Registered before the layer so unmatched paths are redirected too
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            locale_redirect::<S>,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Redirect requests that lack a supported locale prefix.
///
/// Wraps every route and the fallback, so page handlers only ever see
/// locale-qualified paths or excluded ones.
pub async fn locale_redirect<S: DictionaryStore>(
    State(state): State<Arc<AppState<S>>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path();

    if let Some(rule) = state.router.exclusions().first_match(path) {
        debug!("Path {} excluded from locale routing ({})", path, rule);
        state.metrics.record_excluded();
        return next.run(req).await;
    }

    match state.router.decide_uri(req.uri()) {
        RedirectDecision::PassThrough => {
            state.metrics.record_pass_through();
            next.run(req).await
        }
        RedirectDecision::Redirect { location } => {
            debug!("Redirecting {} to {}", path, location);
            state.metrics.record_redirect();
            Redirect::temporary(&location).into_response()
        }
    }
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn static_params<S: DictionaryStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<Vec<StaticParams>> {
    Json(state.resolver.locales().static_params())
}

/// Metadata with default-locale fallback for unsupported codes.
async fn metadata<S: DictionaryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(lang): Path<String>,
) -> Json<MetadataRecord> {
    let record = state.resolver.build_metadata(&lang);
    if record.locale.code() != lang {
        state.metrics.record_locale_fallback();
    }
    Json(record)
}

async fn metrics<S: DictionaryStore>(State(state): State<Arc<AppState<S>>>) -> Json<MetricsReport> {
    Json(state.metrics.report())
}

async fn page<S: DictionaryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(lang): Path<String>,
) -> Result<Json<PageContext>, ApiError> {
    render_page(&state, &lang).await
}

async fn page_nested<S: DictionaryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path((lang, _rest)): Path<(String, String)>,
) -> Result<Json<PageContext>, ApiError> {
    render_page(&state, &lang).await
}

/// Page lookup is strict: a path locale outside the set is a 404, not a
/// fallback.
async fn render_page<S: DictionaryStore>(
    state: &AppState<S>,
    lang: &str,
) -> Result<Json<PageContext>, ApiError> {
    let locale = state
        .resolver
        .locales()
        .get(lang)
        .ok_or_else(|| ApiError::UnknownLocale(lang.to_string()))?;

    match state.resolver.page_for(locale).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            state.metrics.record_dictionary_failure();
            Err(e.into())
        }
    }
}

/// Serve the application until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);

    info!(
        "Supported locales: {} (default: {})",
        state
            .resolver
            .enumerate_locales()
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>()
            .join(", "),
        state.resolver.locales().default_locale()
    );

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_locale_is_404() {
        let response = ApiError::UnknownLocale("fr".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_dictionary_is_404() {
        let response = ApiError::from(DictionaryError::NotFound("ja".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_io_failure_is_500() {
        let err = DictionaryError::Io {
            path: "dictionaries/ja.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
