use crate::i18n::Language;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use std::convert::Infallible;

/// Cookie the site's language switcher sets.
pub const LANGUAGE_COOKIE: &str = "django_language";

/// Locale for the current request.
///
/// Taken from the `lang` query parameter, else the language cookie, else
/// Italian. Unsupported values silently become Italian, so this extractor
/// never rejects a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLanguage(pub Language);

fn query_lang(parts: &Parts) -> Option<String> {
    let query = parts.uri.query()?;
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .ok()?
        .into_iter()
        .find(|(key, value)| key == "lang" && !value.trim().is_empty())
        .map(|(_, value)| value)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestLanguage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(code) = query_lang(parts) {
            return Ok(RequestLanguage(Language::coerce(Some(&code))));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(LANGUAGE_COOKIE).map(|c| c.value().to_string());

        Ok(RequestLanguage(Language::coerce(cookie.as_deref())))
    }
}
