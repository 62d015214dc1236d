//! Locale router: decides, per request path, whether to pass the request
//! through or redirect it to a locale-qualified path.
//!
//! Exclusion rules run first, in order. Paths they match are never
//! redirected. Everything else either already starts with a supported
//! locale segment or is redirected under the default locale.

use crate::i18n::LocaleSet;
use axum::http::Uri;
use std::fmt;
use std::sync::Arc;

/// Outcome of routing one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// Serve the request unchanged
    PassThrough,

    /// Redirect to a locale-qualified location
    Redirect { location: String },
}

impl RedirectDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, RedirectDecision::Redirect { .. })
    }
}

/// One path pattern that is never subject to locale redirection.
///
/// Rules test the path text after its leading `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionRule {
    /// Text starts with the given prefix (`api` matches `/api`, `/api/x`, `/apiary`)
    PathPrefix(&'static str),

    /// Text equals the given file name
    Exact(&'static str),

    /// Text contains a `.` anywhere (files with an extension)
    ContainsDot,
}

impl ExclusionRule {
    pub fn matches(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        match self {
            ExclusionRule::PathPrefix(prefix) => rest.starts_with(prefix),
            ExclusionRule::Exact(name) => rest == *name,
            ExclusionRule::ContainsDot => rest.contains('.'),
        }
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionRule::PathPrefix(prefix) => write!(f, "prefix /{}", prefix),
            ExclusionRule::Exact(name) => write!(f, "file /{}", name),
            ExclusionRule::ContainsDot => f.write_str("path with extension"),
        }
    }
}

/// Ordered list of exclusion rules, evaluated before locale matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    rules: Vec<ExclusionRule>,
}

impl ExclusionPolicy {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    /// A policy that excludes nothing.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    /// The first rule matching `path`, if any.
    pub fn first_match(&self, path: &str) -> Option<ExclusionRule> {
        self.rules.iter().copied().find(|rule| rule.matches(path))
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }
}

impl Default for ExclusionPolicy {
    /// Framework assets, API routes, favicon, files with an extension and
    /// the well-known static files.
    fn default() -> Self {
        Self::new(vec![
            ExclusionRule::PathPrefix("_next"),
            ExclusionRule::PathPrefix("api"),
            ExclusionRule::Exact("favicon.ico"),
            ExclusionRule::ContainsDot,
            ExclusionRule::Exact("manifest.webmanifest"),
            ExclusionRule::Exact("robots.txt"),
            ExclusionRule::Exact("sitemap.xml"),
        ])
    }
}

/// Whether `path` already targets `code` (`/code` or `/code/...`).
fn has_locale_prefix(path: &str, code: &str) -> bool {
    path.strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(code))
        .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
}

/// Route a path against the supported locales.
///
/// Total and pure. A path without a supported prefix is redirected to
/// `/{default}{path}`; an unknown leading segment is kept as part of the
/// path (`/fr/about` becomes `/zh/fr/about` when `zh` is the default).
pub fn route(path: &str, locales: &LocaleSet) -> RedirectDecision {
    if locales.iter().any(|locale| has_locale_prefix(path, locale.code())) {
        return RedirectDecision::PassThrough;
    }

    let default = locales.default_locale();
    let location = if path.starts_with('/') {
        format!("/{}{}", default, path)
    } else {
        format!("/{}/{}", default, path)
    };
    RedirectDecision::Redirect { location }
}

/// Exclusion policy plus locale routing over a shared locale set.
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    locales: Arc<LocaleSet>,
    exclusions: ExclusionPolicy,
}

impl LocaleRouter {
    pub fn new(locales: Arc<LocaleSet>, exclusions: ExclusionPolicy) -> Self {
        Self {
            locales,
            exclusions,
        }
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn exclusions(&self) -> &ExclusionPolicy {
        &self.exclusions
    }

    /// Decide for a bare path: excluded paths always pass through.
    pub fn decide(&self, path: &str) -> RedirectDecision {
        if self.exclusions.is_excluded(path) {
            return RedirectDecision::PassThrough;
        }
        route(path, &self.locales)
    }

    /// Decide for a full request URI, carrying the query string into the
    /// redirect location.
    pub fn decide_uri(&self, uri: &Uri) -> RedirectDecision {
        match self.decide(uri.path()) {
            RedirectDecision::Redirect { location } => match uri.query() {
                Some(query) => RedirectDecision::Redirect {
                    location: format!("{}?{}", location, query),
                },
                None => RedirectDecision::Redirect { location },
            },
            pass => pass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn locales(default: &str) -> LocaleSet {
        LocaleSet::builtin(default).unwrap()
    }

    fn router() -> LocaleRouter {
        LocaleRouter::new(Arc::new(locales("zh")), ExclusionPolicy::default())
    }

    fn redirect(location: &str) -> RedirectDecision {
        RedirectDecision::Redirect {
            location: location.to_string(),
        }
    }

    // ==================== route Tests ====================

    #[test]
    fn test_root_redirects_to_default() {
        assert_eq!(route("/", &locales("zh")), redirect("/zh/"));
    }

    #[test]
    fn test_locale_prefixed_path_passes() {
        assert_eq!(route("/zh/about", &locales("zh")), RedirectDecision::PassThrough);
        assert_eq!(route("/en/a/b/c", &locales("zh")), RedirectDecision::PassThrough);
    }

    #[test]
    fn test_bare_locale_passes() {
        assert_eq!(route("/ja", &locales("zh")), RedirectDecision::PassThrough);
        assert_eq!(route("/ja/", &locales("zh")), RedirectDecision::PassThrough);
    }

    #[test]
    fn test_unknown_prefix_is_ordinary_path() {
        assert_eq!(route("/fr/about", &locales("zh")), redirect("/zh/fr/about"));
    }

    #[test]
    fn test_prefix_must_end_at_segment_boundary() {
        assert_eq!(route("/english", &locales("zh")), redirect("/zh/english"));
        assert_eq!(route("/zhx/page", &locales("zh")), redirect("/zh/zhx/page"));
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert_eq!(route("/ZH/about", &locales("zh")), redirect("/zh/ZH/about"));
    }

    #[test]
    fn test_redirect_uses_set_default() {
        assert_eq!(route("/about", &locales("en")), redirect("/en/about"));
    }

    #[test]
    fn test_relative_path_gets_separator() {
        assert_eq!(route("about", &locales("zh")), redirect("/zh/about"));
    }

    // ==================== Exclusion Tests ====================

    #[test]
    fn test_default_exclusions() {
        let policy = ExclusionPolicy::default();
        for path in [
            "/_next/static/chunk.js",
            "/_next/image",
            "/api",
            "/api/chat",
            "/favicon.ico",
            "/robots.txt",
            "/sitemap.xml",
            "/manifest.webmanifest",
            "/architecture.png",
            "/zh/v1.2",
        ] {
            assert!(policy.is_excluded(path), "{} should be excluded", path);
        }
    }

    #[test]
    fn test_root_and_pages_not_excluded() {
        let policy = ExclusionPolicy::default();
        for path in ["/", "/about", "/zh", "/zh/about", "/fr/about"] {
            assert!(!policy.is_excluded(path), "{} should not be excluded", path);
        }
    }

    #[test]
    fn test_first_match_reports_rule_in_order() {
        let policy = ExclusionPolicy::default();
        assert_eq!(policy.first_match("/api/x"), Some(ExclusionRule::PathPrefix("api")));
        assert_eq!(policy.first_match("/favicon.ico"), Some(ExclusionRule::Exact("favicon.ico")));
        assert_eq!(policy.first_match("/robots.txt"), Some(ExclusionRule::ContainsDot));
    }

    #[test]
    fn test_api_prefix_matches_without_slash() {
        assert!(ExclusionRule::PathPrefix("api").matches("/apiary"));
    }

    #[test]
    fn test_empty_policy_excludes_nothing() {
        assert!(!ExclusionPolicy::none().is_excluded("/favicon.ico"));
    }

    // ==================== LocaleRouter Tests ====================

    #[test]
    fn test_router_never_redirects_excluded() {
        let router = router();
        assert_eq!(router.decide("/api/x"), RedirectDecision::PassThrough);
        assert_eq!(router.decide("/favicon.ico"), RedirectDecision::PassThrough);
        assert_eq!(router.decide("/robots.txt"), RedirectDecision::PassThrough);
    }

    #[test]
    fn test_router_redirects_root() {
        assert_eq!(router().decide("/"), redirect("/zh/"));
    }

    #[test]
    fn test_decide_uri_keeps_query() {
        let uri: Uri = "/about?ref=home&x=1".parse().unwrap();
        assert_eq!(router().decide_uri(&uri), redirect("/zh/about?ref=home&x=1"));
    }

    #[test]
    fn test_decide_uri_without_query() {
        let uri: Uri = "/about".parse().unwrap();
        assert_eq!(router().decide_uri(&uri), redirect("/zh/about"));
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_prefixed_paths_pass(idx in 0usize..3, tail in "(/[a-z0-9_-]{0,8}){0,4}") {
            let set = locales("zh");
            let code = set.enumerate_locales()[idx].code();
            let path = format!("/{}{}", code, tail);
            prop_assert_eq!(route(&path, &set), RedirectDecision::PassThrough);
        }

        #[test]
        fn prop_unprefixed_paths_redirect_under_default(tail in "(/[a-z0-9_-]{0,8}){0,4}") {
            let set = locales("zh");
            let path = if tail.is_empty() { "/".to_string() } else { tail };
            prop_assume!(!set.iter().any(|l| has_locale_prefix(&path, l.code())));
            prop_assume!(!ExclusionPolicy::default().is_excluded(&path));

            let expected = format!("/zh{}", path);
            prop_assert_eq!(
                router().decide(&path),
                RedirectDecision::Redirect { location: expected }
            );
        }

        #[test]
        fn prop_dotted_paths_never_redirect(stem in "[a-z/]{0,10}", ext in "[a-z]{1,4}") {
            let path = format!("/{}.{}", stem, ext);
            prop_assert_eq!(router().decide(&path), RedirectDecision::PassThrough);
        }
    }
}
