//! HttpBackend against a local axum server speaking the endpoint contracts

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use rhtmx_formguard::backend::{GroupCheckRequest, GroupCheckResponse};
use rhtmx_formguard::config::BackendConfig;
use rhtmx_formguard::field::attr;
use rhtmx_formguard::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

async fn translate(Path((lang, label)): Path<(String, String)>) -> Result<String, StatusCode> {
    match (lang.as_str(), label.as_str()) {
        ("en", "in_group") => Ok("Already in use".to_string()),
        ("fr", "in_group") => Ok("Déjà utilisé".to_string()),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn validate_group(
    Path(group): Path<String>,
    Json(body): Json<GroupCheckRequest>,
) -> Result<Json<GroupCheckResponse>, StatusCode> {
    match group.as_str() {
        "usernames" => Ok(Json(GroupCheckResponse {
            valid: body.candidate == "alice",
        })),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn signup(headers: HeaderMap, body: String) -> (StatusCode, Json<Value>) {
    let form_encoded = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.starts_with("application/x-www-form-urlencoded"));
    if !form_encoded {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(json!({})));
    }

    if body.contains("username=taken") {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": [{ "field": "username", "message": "already taken" }] })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "redirect_url": "/welcome" })))
    }
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({ "echo": params.get("q") }))
}

async fn serve() -> String {
    let app = Router::new()
        .route("/:lang/translation/:label", get(translate))
        .route("/validate/:group", post(validate_group))
        .route("/signup", post(signup))
        .route("/search", get(search));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(&BackendConfig {
        base_url: base_url.to_string(),
        request_timeout_ms: 2_000,
    })
    .unwrap()
}

#[tokio::test]
async fn test_translation_endpoint() {
    let backend = backend(&serve().await);

    assert_eq!(backend.translation("en", "in_group").await.unwrap(), "Already in use");
    assert_eq!(backend.translation("fr", "in_group").await.unwrap(), "Déjà utilisé");
    assert!(matches!(
        backend.translation("en", "missing").await,
        Err(FormGuardError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_group_endpoint() {
    let backend = backend(&serve().await);

    assert!(backend.group_contains("usernames", "alice").await.unwrap());
    assert!(!backend.group_contains("usernames", "bob").await.unwrap());
    assert!(backend.group_contains("nope", "bob").await.is_err());
}

#[tokio::test]
async fn test_submit_post_and_get() {
    let backend = backend(&serve().await);

    let response = backend
        .submit(&SubmitRequest {
            action: "/signup".into(),
            method: FormMethod::Post,
            body: "username=bob".into(),
        })
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.redirect_url(), Some("/welcome"));

    let response = backend
        .submit(&SubmitRequest {
            action: "/search".into(),
            method: FormMethod::Get,
            body: "q=rust+forms".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.body, json!({ "echo": "rust forms" }));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Port 9 (discard) is not expected to serve HTTP locally
    let backend = backend("http://127.0.0.1:9");
    assert!(matches!(
        backend.translation("en", "in_group").await,
        Err(FormGuardError::Http { .. })
    ));
}

#[tokio::test]
async fn test_session_over_http() {
    let base_url = serve().await;
    let mut config = Config::default();
    config.backend.base_url = base_url;

    let form = Form::new("/signup", FormMethod::Post).with_field(
        InputField::new("username")
            .validated()
            .with_value("taken")
            .with_attr(attr::EMPTY, ""),
    );
    let backend = Arc::new(HttpBackend::new(&config.backend).unwrap());
    let session = FormSession::new(form, backend, &config);

    assert!(session.validate_all().await);
    assert!(matches!(session.submit().await, SubmitOutcome::Rejected(1)));
    let form = session.snapshot().await;
    assert_eq!(form.messages.all()[0].text, "already taken");

    session.input("username", "alice").await;
    match session.submit().await {
        SubmitOutcome::Redirect(url) => assert_eq!(url, "/welcome"),
        other => panic!("expected redirect, got {:?}", other),
    }
}
