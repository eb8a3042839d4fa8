use crate::api::{AppState, JsonBody, PathParams, RequestLanguage};
use crate::contacts::{ContactMessage, ContactSubmission};
use crate::error::{AppError, Result};
use crate::pages::views::{
    AboutPageView, ContactPageView, HomePageView, PrivacyPolicyView, SellPageView,
    ServicePageView,
};
use crate::pages::{AboutPage, ContactPage, HomePage, PageKind, PrivacyPolicy, SellPage, ServicePage};
use crate::properties::format::{format_detail, format_listing, PresentationDetail, PresentationListing};
use crate::properties::query::{PageLinks, PropertyQuery};
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::{json, Value};

const PROPERTIES_PATH: &str = "/api/properties/";

/// One page of public listings.
#[derive(Debug, Serialize)]
pub struct PropertyPage {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PresentationListing>,
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /api/page/:kind/`
pub async fn page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    RequestLanguage(lang): RequestLanguage,
) -> Result<Response> {
    let response = match PageKind::from_slug(&slug) {
        Some(PageKind::Home) => {
            let record = state.pages.load::<HomePage>().await?;
            Json(HomePageView::build(&record, lang, &state.media)).into_response()
        }
        Some(PageKind::Sell) => {
            let record = state.pages.load::<SellPage>().await?;
            Json(SellPageView::build(&record, lang, &state.media)).into_response()
        }
        Some(PageKind::Services) => {
            let record = state.pages.load::<ServicePage>().await?;
            Json(ServicePageView::build(&record, lang, &state.media)).into_response()
        }
        Some(PageKind::About) => {
            let record = state.pages.load::<AboutPage>().await?;
            Json(AboutPageView::build(&record, lang, &state.media)).into_response()
        }
        Some(PageKind::Contact) => {
            let record = state.pages.load::<ContactPage>().await?;
            Json(ContactPageView::build(&record, lang)).into_response()
        }
        // Served from its own route
        Some(PageKind::PrivacyPolicy) | None => {
            return Err(AppError::NotFound(format!("Unknown page: {}", slug)));
        }
    };

    Ok(response)
}

/// `GET /api/privacy-policy/`
pub async fn privacy_policy(
    State(state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> Result<Json<PrivacyPolicyView>> {
    let record = state.pages.load::<PrivacyPolicy>().await?;
    Ok(Json(PrivacyPolicyView::build(&record, lang)))
}

/// `GET /api/properties/`
pub async fn list_properties(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    RequestLanguage(lang): RequestLanguage,
) -> Result<Json<PropertyPage>> {
    let pairs: Vec<(String, String)> = match raw.as_deref() {
        Some(query) => serde_urlencoded::from_str(query)
            .map_err(|e| AppError::BadRequest(format!("Invalid query string: {}", e)))?,
        None => Vec::new(),
    };

    let query = PropertyQuery::from_pairs(&pairs);
    let (properties, count) = state.properties.list_active(&query).await?;

    let links = PageLinks {
        path: PROPERTIES_PATH,
        base_url: state.config.public_base_url.as_deref(),
        pairs: &pairs,
    };

    Ok(Json(PropertyPage {
        count,
        next: links.next(query.page, count),
        previous: links.previous(query.page),
        results: properties
            .iter()
            .map(|p| format_listing(p, lang, &state.media))
            .collect(),
    }))
}

/// `GET /api/properties/:id/`
pub async fn property_detail(
    State(state): State<AppState>,
    WithRejection(Path(id), _): PathParams<i64>,
    RequestLanguage(lang): RequestLanguage,
) -> Result<Json<PresentationDetail>> {
    let property = state.properties.get_active(id).await?;
    let gallery = state.properties.images_for(id).await?;

    Ok(Json(format_detail(&property, &gallery, lang, &state.media)))
}

/// `POST /api/contact-messages/`
pub async fn submit_contact(
    State(state): State<AppState>,
    WithRejection(Json(submission), _): JsonBody<ContactSubmission>,
) -> Result<(StatusCode, Json<ContactMessage>)> {
    let message = state.contacts.submit(&submission).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `GET /api/translations/:locale/`
pub async fn translations(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(state.catalog.load(&locale).await?))
}
