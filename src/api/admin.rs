//! Admin API for editing content, managing listings and reading the inbox.
//!
//! Every route here sits behind [`require_admin`]. With no `ADMIN_API_KEY`
//! configured the whole surface answers 503.

use crate::api::{AppState, JsonBody, PathParams, QueryParams};
use crate::contacts::{ContactMessage, MessageListFilter};
use crate::error::{AppError, Result};
use crate::i18n::LanguageRegistry;
use crate::pages::{
    AboutPage, ContactPage, ContentPage, HomePage, PageKind, PageRepository, PrivacyPolicy,
    SellPage, ServicePage,
};
use crate::properties::{NewProperty, NewPropertyImage, Property, PropertyImage, PropertyType};
use crate::security::verify_admin_key;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use validator::Validate;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/choices", get(choices))
        .route("/pages/:kind", get(get_page).put(put_page))
        .route("/properties", get(list_properties).post(create_property))
        .route(
            "/properties/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/properties/:id/active", patch(set_property_active))
        .route("/properties/:id/images", post(add_property_image))
        .route("/properties/:id/images/:image_id", delete(delete_property_image))
        .route("/messages", get(list_messages))
        .route("/messages/unread-count", get(unread_count))
        .route("/messages/:id", get(get_message).patch(set_message_read))
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> std::result::Result<Response, AppError> {
    if let Err(e) = verify_admin_key(state.config.admin_api_key.as_deref(), request.headers()) {
        warn!(
            "Rejected admin request to {} {}: {}",
            request.method(),
            request.uri().path(),
            e
        );
        return Err(e);
    }

    Ok(next.run(request).await)
}

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LanguageChoice {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub is_canonical: bool,
}

#[derive(Debug, Serialize)]
pub struct PropertyTypeChoice {
    pub code: &'static str,
    pub label: &'static str,
}

/// Option lists for the admin editing forms.
#[derive(Debug, Serialize)]
pub struct Choices {
    pub languages: Vec<LanguageChoice>,
    pub property_types: Vec<PropertyTypeChoice>,
}

/// `GET /api/admin/choices` - supported languages and listing types.
async fn choices() -> Json<Choices> {
    let languages = LanguageRegistry::get()
        .list_all()
        .into_iter()
        .map(|config| LanguageChoice {
            code: config.code,
            name: config.name,
            native_name: config.native_name,
            is_canonical: config.is_canonical,
        })
        .collect();

    let property_types = PropertyType::ALL
        .iter()
        .map(|kind| PropertyTypeChoice {
            code: kind.code(),
            label: kind.label(),
        })
        .collect();

    Json(Choices {
        languages,
        property_types,
    })
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

fn unknown_page(slug: &str) -> AppError {
    AppError::NotFound(format!("Unknown page: {}", slug))
}

async fn load_page<P: ContentPage>(pages: &PageRepository) -> Result<Response> {
    Ok(Json(pages.load::<P>().await?).into_response())
}

async fn save_page<P: ContentPage>(pages: &PageRepository, body: Value) -> Result<Response> {
    let content: P = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} content: {}", P::KIND, e)))?;
    Ok(Json(pages.save(&content).await?).into_response())
}

/// `GET /api/admin/pages/:kind` - raw stored content in every language.
async fn get_page(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response> {
    let pages = &state.pages;
    match PageKind::from_slug(&slug).ok_or_else(|| unknown_page(&slug))? {
        PageKind::Home => load_page::<HomePage>(pages).await,
        PageKind::Sell => load_page::<SellPage>(pages).await,
        PageKind::Services => load_page::<ServicePage>(pages).await,
        PageKind::About => load_page::<AboutPage>(pages).await,
        PageKind::Contact => load_page::<ContactPage>(pages).await,
        PageKind::PrivacyPolicy => load_page::<PrivacyPolicy>(pages).await,
    }
}

/// `PUT /api/admin/pages/:kind` - replace the stored content.
///
/// Fields missing from the body fall back to their defaults.
async fn put_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    WithRejection(Json(body), _): JsonBody<Value>,
) -> Result<Response> {
    let pages = &state.pages;
    match PageKind::from_slug(&slug).ok_or_else(|| unknown_page(&slug))? {
        PageKind::Home => save_page::<HomePage>(pages, body).await,
        PageKind::Sell => save_page::<SellPage>(pages, body).await,
        PageKind::Services => save_page::<ServicePage>(pages, body).await,
        PageKind::About => save_page::<AboutPage>(pages, body).await,
        PageKind::Contact => save_page::<ContactPage>(pages, body).await,
        PageKind::PrivacyPolicy => save_page::<PrivacyPolicy>(pages, body).await,
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// A listing with its gallery, as the admin edits it.
#[derive(Debug, Serialize)]
pub struct AdminProperty {
    #[serde(flatten)]
    pub property: Property,
    pub gallery: Vec<PropertyImage>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveUpdate {
    pub is_active: bool,
}

async fn list_properties(State(state): State<AppState>) -> Result<Json<Vec<Property>>> {
    Ok(Json(state.properties.list_all().await?))
}

async fn create_property(
    State(state): State<AppState>,
    WithRejection(Json(input), _): JsonBody<NewProperty>,
) -> Result<(StatusCode, Json<Property>)> {
    input.validate()?;
    let property = state.properties.create(&input).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

async fn get_property(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<Json<AdminProperty>> {
    let property = state.properties.get(id).await?;
    let gallery = state.properties.images_for(id).await?;
    Ok(Json(AdminProperty { property, gallery }))
}

async fn update_property(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
    WithRejection(Json(input), _): JsonBody<NewProperty>,
) -> Result<Json<Property>> {
    input.validate()?;
    Ok(Json(state.properties.update(id, &input).await?))
}

async fn delete_property(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<StatusCode> {
    state.properties.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_property_active(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
    WithRejection(Json(update), _): JsonBody<ActiveUpdate>,
) -> Result<Json<Property>> {
    Ok(Json(state.properties.set_active(id, update.is_active).await?))
}

async fn add_property_image(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
    WithRejection(Json(input), _): JsonBody<NewPropertyImage>,
) -> Result<(StatusCode, Json<PropertyImage>)> {
    input.validate()?;
    let image = state.properties.add_image(id, &input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

async fn delete_property_image(
    State(state): State<AppState>,
    WithRejection(Path((id, image_id)), _): PathParams<(i64, i64)>,
) -> Result<StatusCode> {
    state.properties.delete_image(id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReadUpdate {
    pub is_read: bool,
}

async fn list_messages(
    State(state): State<AppState>,
    WithRejection(Query(filter), _): QueryParams<MessageListFilter>,
) -> Result<Json<Vec<ContactMessage>>> {
    Ok(Json(state.contacts.list(&filter).await?))
}

async fn unread_count(State(state): State<AppState>) -> Result<Json<Value>> {
    let count = state.contacts.unread_count().await?;
    Ok(Json(json!({ "count": count })))
}

/// Opening a message marks it read.
async fn get_message(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
) -> Result<Json<ContactMessage>> {
    let mut message = state.contacts.get(id).await?;
    state.contacts.mark_read_on_view(id).await?;
    message.is_read = true;
    Ok(Json(message))
}

async fn set_message_read(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
    WithRejection(Json(update), _): JsonBody<ReadUpdate>,
) -> Result<Json<ContactMessage>> {
    Ok(Json(state.contacts.set_read(id, update.is_read).await?))
}
