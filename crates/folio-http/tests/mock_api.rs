//! Mock API tests for folio-http.
//!
//! These tests use wiremock to simulate the book API and check the wire
//! shapes and error mapping without network access.

use folio_core::error::ApiErrorKind;
use folio_core::{
    AccessToken, ApiUrl, AuthService, BookDraft, BookId, BookPatch, Credentials, RefreshToken,
    Registration,
};
use folio_http::{HttpAuth, HttpBooks, HttpClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpClient {
    let api = ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    HttpClient::new(api).unwrap()
}

fn grant(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_in": 900,
        "message": "Login successful"
    })
}

fn book_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "author": "Ursula K. Le Guin",
        "genre": "Fantasy",
        "publicationYear": 1968,
        "createdAt": "2025-03-01T09:00:00.000Z",
        "updatedAt": "2025-03-01T09:00:00.000Z"
    })
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "secret123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("A1", "R1")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let grant = auth
        .login(&Credentials::new("alice", "secret123"))
        .await
        .unwrap();

    assert_eq!(grant.access_token.as_str(), "A1");
    assert_eq!(grant.refresh_token.as_str(), "R1");
    assert_eq!(grant.expires_in, 900);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Invalid username or password"
        })))
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let err = auth
        .login(&Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid username or password");
    let api = err.as_api().unwrap();
    assert_eq!(api.status, 401);
    assert_eq!(api.kind(), ApiErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_login_error_without_body_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let err = auth.login(&Credentials::new("alice", "pw")).await.unwrap_err();

    assert_eq!(err.to_string(), "Login failed");
    assert_eq!(err.as_api().unwrap().kind(), ApiErrorKind::Server);
}

#[tokio::test]
async fn test_register_sends_camel_case_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "secret123",
            "firstName": "Alice",
            "lastName": "Liddell"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(grant("A1", "R1")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let profile = Registration {
        username: "alice".into(),
        email: "alice@example.com".into(),
        password: "secret123".into(),
        first_name: "Alice".into(),
        last_name: "Liddell".into(),
    };
    let grant = auth.register(&profile).await.unwrap();
    assert_eq!(grant.access_token.as_str(), "A1");
}

#[tokio::test]
async fn test_register_validation_messages_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": ["email must be an email", "password is too short"],
            "error": "Bad Request"
        })))
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let profile = Registration {
        username: "alice".into(),
        email: "nope".into(),
        password: "x".into(),
        first_name: "Alice".into(),
        last_name: "Liddell".into(),
    };
    let err = auth.register(&profile).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "email must be an email; password is too short"
    );
    assert_eq!(err.as_api().unwrap().kind(), ApiErrorKind::Validation);
}

#[tokio::test]
async fn test_refresh_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("A2", "R2")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let grant = auth.refresh(&RefreshToken::new("R1")).await.unwrap();

    assert_eq!(grant.access_token.as_str(), "A2");
    assert_eq!(grant.refresh_token.as_str(), "R2");
}

#[tokio::test]
async fn test_refresh_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({})))
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let err = auth.refresh(&RefreshToken::new("R1")).await.unwrap_err();

    assert_eq!(err.to_string(), "Token refresh failed");
}

#[tokio::test]
async fn test_logout_sends_bearer_and_refresh_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer A1"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Logged out successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let message = auth
        .logout(&AccessToken::new("A1"), &RefreshToken::new("R1"))
        .await
        .unwrap();

    assert_eq!(message, "Logged out successfully");
}

#[tokio::test]
async fn test_validate_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/validate"))
        .and(body_json(json!({"token": "A1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": true,
            "payload": {"sub": "42", "username": "alice"}
        })))
        .mount(&server)
        .await;

    let auth = HttpAuth::new(client(&server));
    let validation = auth.validate(&AccessToken::new("A1")).await.unwrap();

    assert!(validation.valid);
    assert_eq!(validation.payload["username"], "alice");
}

// ============================================================================
// Book Tests
// ============================================================================

#[tokio::test]
async fn test_list_books() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            book_json("b1", "A Wizard of Earthsea"),
            book_json("b2", "The Left Hand of Darkness")
        ])))
        .mount(&server)
        .await;

    let books = HttpBooks::new(client(&server));
    let list = books.list(&AccessToken::new("A1")).await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[1].title, "The Left Hand of Darkness");
    assert_eq!(list[0].publication_year, 1968);
}

#[tokio::test]
async fn test_get_missing_book_uses_id_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let books = HttpBooks::new(client(&server));
    let id: BookId = "missing".parse().unwrap();
    let err = books.get(&AccessToken::new("A1"), &id).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to fetch book with ID missing");
    assert_eq!(err.as_api().unwrap().kind(), ApiErrorKind::NotFound);
}

#[tokio::test]
async fn test_create_book() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/books"))
        .and(header("authorization", "Bearer A1"))
        .and(body_json(json!({
            "title": "A Wizard of Earthsea",
            "author": "Ursula K. Le Guin",
            "genre": "Fantasy",
            "publicationYear": 1968
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(book_json("b1", "A Wizard of Earthsea")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let books = HttpBooks::new(client(&server));
    let draft = BookDraft {
        title: "A Wizard of Earthsea".into(),
        author: "Ursula K. Le Guin".into(),
        genre: "Fantasy".into(),
        publication_year: 1968,
    };
    let book = books.create(&AccessToken::new("A1"), &draft).await.unwrap();

    assert_eq!(book.id.as_str(), "b1");
}

#[tokio::test]
async fn test_update_sends_only_present_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/books/b1"))
        .and(body_json(json!({"title": "Tehanu"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(book_json("b1", "Tehanu")))
        .expect(1)
        .mount(&server)
        .await;

    let books = HttpBooks::new(client(&server));
    let patch = BookPatch {
        title: Some("Tehanu".into()),
        ..Default::default()
    };
    let id: BookId = "b1".parse().unwrap();
    let book = books
        .update(&AccessToken::new("A1"), &id, &patch)
        .await
        .unwrap();

    assert_eq!(book.title, "Tehanu");
}

#[tokio::test]
async fn test_delete_book_returns_deleted_record() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/books/b1"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(book_json("b1", "A Wizard of Earthsea")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let books = HttpBooks::new(client(&server));
    let id: BookId = "b1".parse().unwrap();
    let deleted = books.delete(&AccessToken::new("A1"), &id).await.unwrap();

    assert_eq!(deleted.title, "A Wizard of Earthsea");
}

#[tokio::test]
async fn test_delete_forbidden_keeps_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/books/b1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "You can only delete your own books"
        })))
        .mount(&server)
        .await;

    let books = HttpBooks::new(client(&server));
    let id: BookId = "b1".parse().unwrap();
    let err = books.delete(&AccessToken::new("A1"), &id).await.unwrap_err();

    assert_eq!(err.to_string(), "You can only delete your own books");
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let books = HttpBooks::new(client(&server));
    let err = books.list(&AccessToken::new("A1")).await.unwrap_err();

    assert!(err.is_transport());
}
