//! Language type: validated locale representation.
//!
//! A `Language` can only be built from a code in the registry, so code
//! further down never has to handle an unknown locale.

use crate::error::AppError;
use crate::i18n::LanguageRegistry;
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "it", "en", "de")
    code: &'static str,
}

impl Language {
    pub const ITALIAN: Language = Language { code: "it" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const GERMAN: Language = Language { code: "de" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is one of the supported locales
    /// * `Err(AppError::BadRequest)` otherwise
    pub fn from_code(code: &str) -> Result<Language, AppError> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported locale: {}", code)))
    }

    /// Resolve a user-supplied code, silently coercing anything missing or
    /// unsupported to the canonical language.
    pub fn coerce(code: Option<&str>) -> Language {
        code.and_then(|c| Language::from_code(c.trim()).ok())
            .unwrap_or_else(Language::canonical)
    }

    /// Get the canonical (fallback) language.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
