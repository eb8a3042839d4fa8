use crate::error::{AppError, Result};
use crate::i18n::Language;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Static UI strings, one `<code>.json` file per supported locale.
///
/// The files are deployment assets: they are read on each request and
/// returned verbatim, never parsed into typed keys.
#[derive(Debug, Clone)]
pub struct TranslationCatalog {
    dir: PathBuf,
}

impl TranslationCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the translation document for `code`.
    ///
    /// # Errors
    /// * `BadRequest` when the code is not a supported locale
    /// * `NotFound` when the locale has no file on disk
    /// * `Serialization` when the file is not a JSON object
    pub async fn load(&self, code: &str) -> Result<serde_json::Value> {
        let language = Language::from_code(code)?;
        let path = self.dir.join(format!("{}.json", language.code()));

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "Locale file not found: {}",
                    language
                )));
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Loaded translations from {}", path.display());

        let document: serde_json::Value = serde_json::from_str(&raw)?;
        if !document.is_object() {
            return Err(AppError::Corrupt(format!(
                "{} does not hold a JSON object",
                path.display()
            )));
        }

        Ok(document)
    }
}
