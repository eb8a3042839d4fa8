use crate::error::AppError;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use subtle::ConstantTimeEq;

/// Header carrying the admin key when no bearer token is sent
pub const API_KEY_HEADER: &str = "x-api-key";

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing API keys and other sensitive values
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Pull the presented key from `Authorization: Bearer <key>` or `X-API-Key`.
/// The bearer token wins when both are present.
pub fn presented_api_key(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    bearer
        .or_else(|| {
            headers
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        })
        .filter(|key| !key.is_empty())
}

/// Check the admin key on a request.
///
/// `expected == None` means the admin surface is switched off.
pub fn verify_admin_key(expected: Option<&str>, headers: &HeaderMap) -> Result<(), AppError> {
    let expected = expected.ok_or(AppError::AdminDisabled)?;

    match presented_api_key(headers) {
        Some(presented) if constant_time_compare(presented, expected) => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}
