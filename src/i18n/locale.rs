//! Locale type: a validated handle for one member of a `LocaleSet`.
//!
//! A `Locale` can only be obtained from a `LocaleSet`, so holding one proves
//! the code is supported. It is `Copy` and compares by code.

use serde::{Serialize, Serializer};
use std::fmt;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Locale tag used as the path prefix (e.g., "en", "zh")
    code: &'static str,
}

impl Locale {
    /// Only `LocaleSet` hands these out.
    pub(crate) const fn new(code: &'static str) -> Self {
        Self { code }
    }

    /// Get the locale tag.
    ///
    /// # Returns
    /// The tag as a static string (e.g., "en", "zh", "ja").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Alias for [`Locale::code`], for call sites that read better with it.
    pub fn as_str(&self) -> &'static str {
        self.code
    }

    /// The path prefix for this locale, without a trailing slash (`/zh`).
    pub fn path_prefix(&self) -> String {
        format!("/{}", self.code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        self.code
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
