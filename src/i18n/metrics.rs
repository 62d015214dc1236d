//! Routing and resolution counters.
//!
//! One `RoutingMetrics` lives in the application state; it is shared by
//! reference rather than as a process-wide global.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for router decisions and content resolution.
#[derive(Debug, Default)]
pub struct RoutingMetrics {
    /// Requests redirected to a locale-qualified path
    redirects: AtomicUsize,

    /// Requests that already carried a supported locale prefix
    pass_throughs: AtomicUsize,

    /// Requests skipped by an exclusion rule
    excluded: AtomicUsize,

    /// Metadata/page resolutions that substituted the default locale
    locale_fallbacks: AtomicUsize,

    /// Dictionary loads that failed
    dictionary_failures: AtomicUsize,
}

impl RoutingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pass_through(&self) {
        self.pass_throughs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_excluded(&self) {
        self.excluded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_locale_fallback(&self) {
        self.locale_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dictionary_failure(&self) {
        self.dictionary_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::Relaxed)
    }

    pub fn pass_throughs(&self) -> usize {
        self.pass_throughs.load(Ordering::Relaxed)
    }

    pub fn excluded(&self) -> usize {
        self.excluded.load(Ordering::Relaxed)
    }

    pub fn locale_fallbacks(&self) -> usize {
        self.locale_fallbacks.load(Ordering::Relaxed)
    }

    pub fn dictionary_failures(&self) -> usize {
        self.dictionary_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let redirects = self.redirects();
        let pass_throughs = self.pass_throughs();
        let routed = redirects + pass_throughs;
        let redirect_rate = if routed > 0 {
            (redirects as f64 / routed as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            redirects,
            pass_throughs,
            excluded: self.excluded(),
            redirect_rate,
            locale_fallbacks: self.locale_fallbacks(),
            dictionary_failures: self.dictionary_failures(),
        }
    }
}

/// Snapshot of the routing counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub redirects: usize,
    pub pass_throughs: usize,
    pub excluded: usize,

    /// Share of routed (non-excluded) requests that were redirected, 0-100
    pub redirect_rate: f64,

    pub locale_fallbacks: usize,
    pub dictionary_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = RoutingMetrics::new();
        assert_eq!(metrics.redirects(), 0);
        assert_eq!(metrics.pass_throughs(), 0);
        assert_eq!(metrics.excluded(), 0);
        assert_eq!(metrics.locale_fallbacks(), 0);
        assert_eq!(metrics.dictionary_failures(), 0);
    }

    #[test]
    fn test_record_each_counter() {
        let metrics = RoutingMetrics::new();
        metrics.record_redirect();
        metrics.record_pass_through();
        metrics.record_pass_through();
        metrics.record_excluded();
        metrics.record_locale_fallback();
        metrics.record_dictionary_failure();

        assert_eq!(metrics.redirects(), 1);
        assert_eq!(metrics.pass_throughs(), 2);
        assert_eq!(metrics.excluded(), 1);
        assert_eq!(metrics.locale_fallbacks(), 1);
        assert_eq!(metrics.dictionary_failures(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = RoutingMetrics::new().report();
        assert_eq!(report.redirect_rate, 0.0);
    }

    #[test]
    fn test_report_redirect_rate_ignores_excluded() {
        let metrics = RoutingMetrics::new();

        // 1 redirect, 3 pass-throughs = 25%
        metrics.record_redirect();
        metrics.record_pass_through();
        metrics.record_pass_through();
        metrics.record_pass_through();
        metrics.record_excluded();
        metrics.record_excluded();

        let report = metrics.report();
        assert_eq!(report.redirect_rate, 25.0);
        assert_eq!(report.excluded, 2);
    }

    #[test]
    fn test_instances_are_independent() {
        let a = RoutingMetrics::new();
        let b = RoutingMetrics::new();
        a.record_redirect();
        assert_eq!(b.redirects(), 0);
    }
}
