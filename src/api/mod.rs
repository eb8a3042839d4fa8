//! HTTP surface: the public JSON API plus the key-protected admin API.

pub mod admin;
pub mod lang;
pub mod public;

pub use lang::RequestLanguage;

use crate::config::Config;
use crate::contacts::ContactRepository;
use crate::db::Database;
use crate::error::AppError;
use crate::i18n::TranslationCatalog;
use crate::media::MediaUrls;
use crate::pages::PageRepository;
use crate::properties::PropertyRepository;
use axum::extract::{Path, Query};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Extractors whose rejections answer with the JSON error body.
pub type JsonBody<T> = WithRejection<Json<T>, AppError>;
pub type PathParams<T> = WithRejection<Path<T>, AppError>;
pub type QueryParams<T> = WithRejection<Query<T>, AppError>;

/// Shared handler state. Cheap to clone; every repository wraps the pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pages: PageRepository,
    pub properties: PropertyRepository,
    pub contacts: ContactRepository,
    pub catalog: TranslationCatalog,
    pub media: MediaUrls,
}

impl AppState {
    pub fn new(config: Config, db: &Database) -> Self {
        let media = MediaUrls::new(&config.media_url, config.public_base_url.as_deref());
        let catalog = TranslationCatalog::new(&config.locales_dir);

        Self {
            config: Arc::new(config),
            pages: PageRepository::new(db),
            properties: PropertyRepository::new(db),
            contacts: ContactRepository::new(db),
            catalog,
            media,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(crate::security::API_KEY_HEADER),
        ])
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let admin_routes = admin::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        admin::require_admin,
    ));

    Router::new()
        .route("/health", get(public::health))
        .route("/api/page/:kind/", get(public::page))
        .route("/api/privacy-policy/", get(public::privacy_policy))
        .route("/api/properties/", get(public::list_properties))
        .route("/api/properties/:id/", get(public::property_detail))
        .route("/api/contact-messages/", post(public::submit_contact))
        .route("/api/translations/:locale/", get(public::translations))
        .nest("/api/admin", admin_routes)
        .layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
