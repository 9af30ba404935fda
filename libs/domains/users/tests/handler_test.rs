//! Handler tests for the Users domain
//!
//! These drive the domain router directly:
//! - Request deserialization and structural validation (400)
//! - Business validation (422), conflicts (409), missing users (404)
//! - Status codes, Location header, and response bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(UserDirectory::new(InMemoryUserRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_user_returns_201_with_location() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "  Lenon  ", "email": "  lenon@example.com  ", "role": "  admin " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/1");

    let user: User = json_body(response.into_body()).await;
    assert_eq!(
        user,
        User {
            id: 1,
            name: "Lenon".to_string(),
            email: "lenon@example.com".to_string(),
            role: Role::Admin,
        }
    );
}

#[tokio::test]
async fn test_create_user_body_renders_role_upper_case() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "M", "email": "m@ex.com", "role": "manager" }),
        ))
        .await
        .unwrap();

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({ "id": 1, "name": "M", "email": "m@ex.com", "role": "MANAGER" })
    );
}

#[tokio::test]
async fn test_create_user_business_rule_returns_422() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "X", "email": "x@ex.com", "role": "TECH" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Role must be one of: {ADMIN, USER, MANAGER}");
}

#[tokio::test]
async fn test_create_user_null_name_returns_422() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": null, "email": "x@ex.com", "role": "USER" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Name cannot be blank");
}

#[tokio::test]
async fn test_create_user_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"X\","))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
    assert_eq!(body["code"], 1003);
}

#[tokio::test]
async fn test_create_user_without_json_content_type_returns_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(r#"{"name":"X","email":"x@ex.com","role":"USER"}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
    assert_eq!(body["code"], 1003);
}

#[tokio::test]
async fn test_create_user_wrong_field_type_returns_400() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": 42, "email": "x@ex.com", "role": "USER" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_structural_bounds_return_400_with_details() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "n".repeat(101), "email": "x@ex.com", "role": "USER" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert_eq!(body["details"][0]["field"], "name");
}

#[tokio::test]
async fn test_create_user_padded_name_within_bounds_after_trim_returns_201() {
    let padded = format!("{}Lenon{}", " ".repeat(60), " ".repeat(60));

    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": padded, "email": "lenon@example.com", "role": "admin" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let user: User = json_body(response.into_body()).await;
    assert_eq!(user.name, "Lenon");
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = app();

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "A", "email": "mail@ex.com", "role": "ADMIN" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "B", "email": "MAIL@EX.COM", "role": "USER" }),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = json_body(second.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let response = app().oneshot(empty_request("GET", "/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "User not found: 999");
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_list_users_returns_200() {
    let directory = UserDirectory::new(InMemoryUserRepository::new());
    directory
        .create(UserRequest::new("A", "a@ex.com", "ADMIN"))
        .await
        .unwrap();
    directory
        .create(UserRequest::new("B", "b@ex.com", "USER"))
        .await
        .unwrap();

    let response = handlers::router(directory)
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<User> = json_body(response.into_body()).await;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "a@ex.com");
    assert_eq!(users[1].email, "b@ex.com");
}

#[tokio::test]
async fn test_update_user_returns_200_and_persists() {
    let directory = UserDirectory::new(InMemoryUserRepository::new());
    let saved = directory
        .create(UserRequest::new("X", "x@ex.com", "USER"))
        .await
        .unwrap();
    let app = handlers::router(directory);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", saved.id),
            json!({ "name": " New Name ", "email": " new@ex.com ", "role": " manager " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = json_body(response.into_body()).await;
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.role, Role::Manager);

    let fetched = app
        .oneshot(empty_request("GET", &format!("/{}", saved.id)))
        .await
        .unwrap();
    let fetched: User = json_body(fetched.into_body()).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_with_invalid_email_returns_422_and_keeps_user() {
    let directory = UserDirectory::new(InMemoryUserRepository::new());
    let saved = directory
        .create(UserRequest::new("A", "a@ex.com", "USER"))
        .await
        .unwrap();
    let app = handlers::router(directory);
    let uri = format!("/{}", saved.id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({ "name": "B", "email": "bad", "role": "ADMIN" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Invalid email");

    let fetched = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    let fetched: User = json_body(fetched.into_body()).await;
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/7",
            json!({ "name": "", "email": "", "role": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_returns_204_then_404() {
    let directory = UserDirectory::new(InMemoryUserRepository::new());
    let saved = directory
        .create(UserRequest::new("Del", "del@ex.com", "USER"))
        .await
        .unwrap();
    let app = handlers::router(directory);
    let uri = format!("/{}", saved.id);

    let response = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
