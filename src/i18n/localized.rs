//! Per-locale field values and their resolution rules.
//!
//! Content is stored as one value per supported locale, serialized as
//! `{"it": ..., "en": ..., "de": ...}`. Display code asks for a locale and
//! gets that locale's value, or the canonical (Italian) one when the requested
//! value is missing or empty.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};

/// Values whose "empty" state triggers locale fallback.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// A value that varies by language.
///
/// Missing keys deserialize to the empty value, unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized<T> {
    #[serde(default)]
    pub it: T,
    #[serde(default)]
    pub en: T,
    #[serde(default)]
    pub de: T,
}

/// Localized single string (titles, paragraphs, notes).
pub type LocalizedText = Localized<String>;

/// Localized ordered list of strings (e.g. a property's room composition).
pub type LocalizedList = Localized<Vec<String>>;

impl<T> Localized<T> {
    pub fn new(it: T, en: T, de: T) -> Self {
        Self { it, en, de }
    }

    /// Raw slot for a language, without fallback.
    pub fn get(&self, lang: Language) -> &T {
        match lang.code() {
            "en" => &self.en,
            "de" => &self.de,
            _ => &self.it,
        }
    }
}

impl<T: Blank + Clone> Localized<T> {
    /// Resolve for display, falling back to the canonical language.
    pub fn resolve(&self, lang: Language) -> T {
        self.resolve_with_fallback(lang, Language::canonical())
    }

    /// Resolve for display with an explicit fallback language.
    ///
    /// Returns the requested value when non-empty, else the fallback value
    /// (which may itself be empty).
    pub fn resolve_with_fallback(&self, lang: Language, fallback: Language) -> T {
        let requested = self.get(lang);
        if !requested.is_blank() {
            return requested.clone();
        }
        self.get(fallback).clone()
    }

    /// True when no locale carries a value.
    pub fn is_blank(&self) -> bool {
        self.it.is_blank() && self.en.is_blank() && self.de.is_blank()
    }
}

impl LocalizedText {
    /// Same text in every locale.
    pub fn uniform(text: &str) -> Self {
        Self::new(text.to_string(), text.to_string(), text.to_string())
    }
}

/// A named content field, tagged by shape.
///
/// Content records expose their fields through this type so display code
/// dispatches on the variant instead of inspecting JSON at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a LocalizedText),
    List(&'a LocalizedList),
    /// Not localized: names, phone numbers, image paths, URLs
    Plain(&'a str),
}

/// Display-ready value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    Text(String),
    List(Vec<String>),
}

impl Resolved {
    /// Text form; lists are joined with newlines.
    pub fn into_text(self) -> String {
        match self {
            Resolved::Text(text) => text,
            Resolved::List(items) => items.join("\n"),
        }
    }
}

impl<'a> FieldValue<'a> {
    pub fn resolve(&self, lang: Language) -> Resolved {
        self.resolve_with_fallback(lang, Language::canonical())
    }

    pub fn resolve_with_fallback(&self, lang: Language, fallback: Language) -> Resolved {
        match self {
            FieldValue::Text(text) => Resolved::Text(text.resolve_with_fallback(lang, fallback)),
            FieldValue::List(list) => Resolved::List(list.resolve_with_fallback(lang, fallback)),
            FieldValue::Plain(value) => Resolved::Text(value.to_string()),
        }
    }
}

/// Split multi-line text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
