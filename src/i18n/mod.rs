//! Internationalization (i18n) module for multi-language support.
//!
//! All locale handling lives here: the closed set of supported languages,
//! per-locale content values with their fallback rules, and the static
//! translation files served to the frontend.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Type-safe Language type, only constructible from supported codes
//! - `localized`: Per-locale field values (`LocalizedText`, `LocalizedList`) and resolution
//! - `catalog`: Read-only access to the `<locale>.json` translation files
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Language, LocalizedText};
//!
//! let title: LocalizedText = serde_json::from_str(r#"{"it": "Villa sul lago"}"#)?;
//!
//! // English is empty, so the Italian text is returned
//! assert_eq!(title.resolve(Language::ENGLISH), "Villa sul lago");
//! ```

mod catalog;
mod language;
mod localized;
mod registry;

pub use catalog::TranslationCatalog;
pub use language::Language;
pub use localized::{
    split_lines, Blank, FieldValue, Localized, LocalizedList, LocalizedText, Resolved,
};
pub use registry::{LanguageConfig, LanguageRegistry};
