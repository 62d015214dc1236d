//! Locale-prefix request routing and per-locale page metadata.
//!
//! - [`router`] decides, per request path, between pass-through and a
//!   redirect to a locale-qualified path.
//! - [`i18n`] validates locales, loads dictionaries and assembles metadata.
//! - [`prerender`] writes one set of build artifacts per supported locale.
//! - [`server`] exposes all of the above over HTTP.

pub mod config;
pub mod i18n;
pub mod prerender;
pub mod router;
pub mod server;
