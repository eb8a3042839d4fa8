//! Image URL construction.
//!
//! Images are stored as paths relative to the media root
//! (e.g. `properties/main/property_1.png`). This module turns them into the
//! URLs API clients load.

/// Builds public URLs for stored image paths.
#[derive(Debug, Clone)]
pub struct MediaUrls {
    /// Prefix with leading and trailing slash, e.g. `/media/`
    prefix: String,
    /// Scheme + host without trailing slash, e.g. `https://gardablick.it`
    base_url: Option<String>,
}

impl MediaUrls {
    pub fn new(media_url: &str, base_url: Option<&str>) -> Self {
        let trimmed = media_url.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };

        Self {
            prefix,
            base_url: base_url.map(|b| b.trim_end_matches('/').to_string()),
        }
    }

    /// Root-relative URL like `/media/properties/main/img.png`,
    /// or `None` when no image is set.
    pub fn path(&self, stored: &str) -> Option<String> {
        let stored = stored.trim().trim_start_matches('/');
        if stored.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.prefix, stored))
    }

    /// Absolute URL when a public base URL is configured, root-relative otherwise.
    pub fn absolute(&self, stored: &str) -> Option<String> {
        let path = self.path(stored)?;
        Some(match &self.base_url {
            Some(base) => format!("{}{}", base, path),
            None => path,
        })
    }

    /// Page images render as an empty string when unset.
    pub fn page_image(&self, stored: &str) -> String {
        self.absolute(stored).unwrap_or_default()
    }
}

impl Default for MediaUrls {
    fn default() -> Self {
        Self::new("/media/", None)
    }
}
