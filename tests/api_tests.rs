//! Router-level tests for the public and admin APIs.
//!
//! Each test builds the full application on a private in-memory database
//! and drives it with `tower::ServiceExt::oneshot`, so no port is bound.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use gardablick::api::{router, AppState};
use gardablick::config::Config;
use gardablick::db::Database;
use gardablick::properties::seed::seed_properties;
use gardablick::properties::PropertyRepository;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_KEY: &str = "test-admin-key";

// ==================== Test Helpers ====================

struct TestApp {
    app: Router,
    db: Database,
    _locales: TempDir,
}

fn test_config(locales: &TempDir, admin_api_key: Option<&str>) -> Config {
    Config {
        environment: "test".to_string(),
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        locales_dir: locales.path().to_str().unwrap().to_string(),
        media_url: "/media/".to_string(),
        public_base_url: None,
        admin_api_key: admin_api_key.map(str::to_string),
    }
}

async fn spawn_app_with_key(admin_api_key: Option<&str>) -> TestApp {
    let locales = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        locales.path().join("en.json"),
        r#"{"nav": {"home": "Home", "contact": "Contact"}}"#,
    )
    .expect("Failed to write locale file");

    let db = Database::in_memory().await.expect("Failed to open database");
    let state = AppState::new(test_config(&locales, admin_api_key), &db);

    TestApp {
        app: router(state),
        db,
        _locales: locales,
    }
}

async fn spawn_app() -> TestApp {
    spawn_app_with_key(Some(ADMIN_KEY)).await
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response should be JSON")
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_KEY));

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        };
        self.send(request.unwrap()).await
    }
}

fn sample_property(reference: &str) -> Value {
    json!({
        "ref": reference,
        "location": "Gardone Riviera",
        "price": "850000",
        "area": "180",
        "bedrooms": 3,
        "bathrooms": 2,
        "property_type": "villa",
        "title": {
            "it": "Villa con vista lago",
            "en": "Villa with lake view",
            "de": ""
        },
        "main_image": "properties/gardone/main.jpg",
        "latitude": "45.62",
        "longitude": "10.56"
    })
}

fn sample_contact() -> Value {
    json!({
        "first_name": "Marta",
        "last_name": "Bianchi",
        "email": "marta@example.it",
        "message": "Vorrei visitare la villa.",
        "privacy_accepted": true,
        "source": "property",
        "property_ref": "RF: 00152"
    })
}

// ==================== Health Tests ====================

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ==================== Translation Tests ====================

#[tokio::test]
async fn test_translations_returned_verbatim() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/translations/en/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"nav": {"home": "Home", "contact": "Contact"}}));
}

#[tokio::test]
async fn test_translations_unsupported_locale() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/translations/fr/").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unsupported locale: fr");
}

#[tokio::test]
async fn test_translations_missing_file() {
    let app = spawn_app().await;

    let (status, _) = app.get("/api/translations/de/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ==================== Page Tests ====================

#[tokio::test]
async fn test_page_created_on_first_read() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/page/home/?lang=en").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["about_section"]["heading"], "");
    assert_eq!(body["service_icons"].as_array().unwrap().len(), 5);
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn test_contact_page_defaults() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/page/contact/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company_name"], "GARDABLICK");
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let app = spawn_app().await;

    assert_eq!(app.get("/api/page/blog/").await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        app.get("/api/page/privacy-policy/").await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_privacy_policy_has_lists() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/privacy-policy/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_purposes_list"], json!([]));
    assert_eq!(body["cookie_types_list"], json!([]));
}

#[tokio::test]
async fn test_admin_page_edit_shows_in_public_view() {
    let app = spawn_app().await;

    let (status, saved) = app
        .admin(
            Method::PUT,
            "/api/admin/pages/about",
            Some(json!({
                "agency_heading": {"it": "La nostra agenzia", "en": "Our agency", "de": ""},
                "team_member_1_name": "Giulia Rossi"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["content"]["team_member_1_name"], "Giulia Rossi");

    let (_, english) = app.get("/api/page/about/?lang=en").await;
    assert_eq!(english["agency_section"]["heading"], "Our agency");
    assert_eq!(english["team_members"][0]["name"], "Giulia Rossi");

    // Blank German falls back to Italian
    let (_, german) = app.get("/api/page/about/?lang=de").await;
    assert_eq!(german["agency_section"]["heading"], "La nostra agenzia");
}

#[tokio::test]
async fn test_language_cookie_used_without_query() {
    let app = spawn_app().await;
    app.admin(
        Method::PUT,
        "/api/admin/pages/about",
        Some(json!({"agency_heading": {"it": "Agenzia", "en": "Agency", "de": "Agentur"}})),
    )
    .await;

    let request = Request::get("/api/page/about/")
        .header(header::COOKIE, "django_language=de")
        .body(Body::empty())
        .unwrap();
    let (_, body) = app.send(request).await;

    assert_eq!(body["agency_section"]["heading"], "Agentur");
}

// ==================== Property Catalog Tests ====================

#[tokio::test]
async fn test_property_list_pagination_shape() {
    let app = spawn_app().await;
    seed_properties(&PropertyRepository::new(&app.db))
        .await
        .unwrap();

    let (status, body) = app.get("/api/properties/?page_size=4&lang=en").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 9);
    assert_eq!(body["results"].as_array().unwrap().len(), 4);
    assert!(body["previous"].is_null());
    let next = body["next"].as_str().unwrap();
    assert!(next.starts_with("/api/properties/?"));
    assert!(next.contains("page=2"));
    assert!(next.contains("lang=en"));

    let (_, last) = app.get("/api/properties/?page_size=4&page=3").await;
    assert_eq!(last["results"].as_array().unwrap().len(), 1);
    assert!(last["next"].is_null());
    assert!(last["previous"].as_str().unwrap().contains("page=2"));
}

#[tokio::test]
async fn test_property_list_price_sort() {
    let app = spawn_app().await;
    seed_properties(&PropertyRepository::new(&app.db))
        .await
        .unwrap();

    let (_, body) = app.get("/api/properties/?sort=price_desc&page_size=50").await;

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 9);
    assert_eq!(results[0]["price"], "3.150.000€");
}

#[tokio::test]
async fn test_unknown_property_type_matches_nothing() {
    let app = spawn_app().await;
    seed_properties(&PropertyRepository::new(&app.db))
        .await
        .unwrap();

    let (status, body) = app.get("/api/properties/?property_type=castle").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_property_detail_localized() {
    let app = spawn_app().await;
    let (_, created) = app
        .admin(Method::POST, "/api/admin/properties", Some(sample_property("RF: 9001")))
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/properties/{}/?lang=en", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Villa with lake view");
    assert_eq!(body["ref"], "RF: 9001");
    assert_eq!(body["price"], "850.000€");
    assert_eq!(body["main_image"], "/media/properties/gardone/main.jpg");
    assert_eq!(body["gallery_images"], json!([]));
    assert!(body["map_location"]["lat"].is_number());

    let (_, german) = app.get(&format!("/api/properties/{}/?lang=de", id)).await;
    assert_eq!(german["title"], "Villa con vista lago");
}

#[tokio::test]
async fn test_property_detail_missing() {
    let app = spawn_app().await;

    let (status, _) = app.get("/api/properties/404/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_property_detail_non_numeric_id() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/properties/abc/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// ==================== Contact Form Tests ====================

#[tokio::test]
async fn test_contact_submission_created() {
    let app = spawn_app().await;

    let (status, body) = app.post_json("/api/contact-messages/", sample_contact()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_read"], false);
    assert_eq!(body["source"], "property");
    assert_eq!(body["property_ref"], "RF: 00152");
}

#[tokio::test]
async fn test_contact_submission_invalid_fields() {
    let app = spawn_app().await;
    let mut input = sample_contact();
    input["email"] = json!("not-an-email");
    input["privacy_accepted"] = json!(false);

    let (status, body) = app.post_json("/api/contact-messages/", input).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["email"].is_array());
    assert!(body["fields"]["privacy_accepted"].is_array());

    let (_, count) = app
        .admin(Method::GET, "/api/admin/messages/unread-count", None)
        .await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_contact_submission_missing_required_field() {
    let app = spawn_app().await;
    let mut input = sample_contact();
    input.as_object_mut().unwrap().remove("first_name");

    let (status, body) = app.post_json("/api/contact-messages/", input).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["first_name"][0], "This field is required.");
    assert!(body["fields"].get("last_name").is_none());
}

#[tokio::test]
async fn test_contact_submission_malformed_json() {
    let app = spawn_app().await;

    let request = Request::post("/api/contact-messages/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// ==================== Admin Auth Tests ====================

#[tokio::test]
async fn test_admin_disabled_without_key() {
    let app = spawn_app_with_key(None).await;

    let request = Request::get("/api/admin/messages")
        .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_KEY))
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_admin_rejects_wrong_or_missing_key() {
    let app = spawn_app().await;

    let (status, _) = app.get("/api/admin/messages").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::get("/api/admin/messages")
        .header("x-api-key", "wrong-key")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_accepts_api_key_header() {
    let app = spawn_app().await;

    let request = Request::get("/api/admin/messages")
        .header("x-api-key", ADMIN_KEY)
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// ==================== Admin Property Tests ====================

#[tokio::test]
async fn test_admin_property_lifecycle() {
    let app = spawn_app().await;

    let (status, created) = app
        .admin(Method::POST, "/api/admin/properties", Some(sample_property("RF: 7")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, _) = app
        .admin(Method::POST, "/api/admin/properties", Some(sample_property("RF: 7")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, image) = app
        .admin(
            Method::POST,
            &format!("/api/admin/properties/{}/images", id),
            Some(json!({"image": "properties/gardone/1.jpg", "order": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, full) = app
        .admin(Method::GET, &format!("/api/admin/properties/{}", id), None)
        .await;
    assert_eq!(full["ref"], "RF: 7");
    assert_eq!(full["gallery"].as_array().unwrap().len(), 1);

    let (_, detail) = app.get(&format!("/api/properties/{}/", id)).await;
    assert_eq!(detail["gallery_images"], json!(["/media/properties/gardone/1.jpg"]));

    let (status, _) = app
        .admin(
            Method::DELETE,
            &format!("/api/admin/properties/{}/images/{}", id, image["id"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, hidden) = app
        .admin(
            Method::PATCH,
            &format!("/api/admin/properties/{}/active", id),
            Some(json!({"is_active": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hidden["is_active"], false);
    assert_eq!(
        app.get(&format!("/api/properties/{}/", id)).await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(app.get("/api/properties/").await.1["count"], 0);

    let (status, _) = app
        .admin(Method::DELETE, &format!("/api/admin/properties/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .admin(Method::GET, &format!("/api/admin/properties/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_property_validation() {
    let app = spawn_app().await;
    let mut input = sample_property("RF: 8");
    input["price"] = json!("-1");
    input["latitude"] = json!("123");

    let (status, body) = app
        .admin(Method::POST, "/api/admin/properties", Some(input))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["price"].is_array());
}

// ==================== Admin Inbox Tests ====================

#[tokio::test]
async fn test_viewing_message_marks_it_read() {
    let app = spawn_app().await;
    let (_, created) = app.post_json("/api/contact-messages/", sample_contact()).await;
    let id = created["id"].as_i64().unwrap();

    let (_, count) = app
        .admin(Method::GET, "/api/admin/messages/unread-count", None)
        .await;
    assert_eq!(count["count"], 1);

    let (status, message) = app
        .admin(Method::GET, &format!("/api/admin/messages/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["is_read"], true);

    let (_, count) = app
        .admin(Method::GET, "/api/admin/messages/unread-count", None)
        .await;
    assert_eq!(count["count"], 0);

    let (_, reverted) = app
        .admin(
            Method::PATCH,
            &format!("/api/admin/messages/{}", id),
            Some(json!({"is_read": false})),
        )
        .await;
    assert_eq!(reverted["is_read"], false);

    let (_, unread) = app
        .admin(Method::GET, "/api/admin/messages?is_read=false", None)
        .await;
    assert_eq!(unread.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_inbox_rejects_malformed_filters() {
    let app = spawn_app().await;

    let (status, body) = app
        .admin(Method::GET, "/api/admin/messages?is_read=maybe", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app
        .admin(Method::GET, "/api/admin/messages/first", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_viewing_missing_message() {
    let app = spawn_app().await;

    let (status, _) = app
        .admin(Method::GET, "/api/admin/messages/12", None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ==================== Admin Choices Tests ====================

#[tokio::test]
async fn test_admin_choices_list_languages_and_types() {
    let app = spawn_app().await;

    let (status, body) = app.admin(Method::GET, "/api/admin/choices", None).await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["languages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|lang| lang["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["it", "en", "de"]);
    assert_eq!(body["languages"][0]["native_name"], "Italiano");
    assert_eq!(body["languages"][0]["is_canonical"], true);
    assert_eq!(body["languages"][2]["name"], "German");
    assert_eq!(body["languages"][2]["is_canonical"], false);

    let types = body["property_types"].as_array().unwrap();
    assert_eq!(types.len(), 9);
    assert!(types
        .iter()
        .any(|t| t["code"] == "casa-singola" && t["label"] == "Detached house"));
}

#[tokio::test]
async fn test_admin_choices_require_key() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/admin/choices").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}
