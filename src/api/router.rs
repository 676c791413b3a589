use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::comments;
use super::health;
use super::photos;
use super::public;
use super::social_medias;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Token issuance (basic credentials or none)
        .nest("/public", public::create_public_router())
        // Registration and login are open; everything else needs a bearer token
        .nest("/users", users::create_users_router())
        .nest("/photos", photos::create_photos_router())
        .nest("/comments", comments::create_comments_router())
        .nest("/socialmedias", social_medias::create_social_medias_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use base64::engine::general_purpose::STANDARD as B64;
    use base64::Engine as _;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::middleware::PublicCredentials;
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::storage::Repositories;
    use crate::infrastructure::user::{Argon2Hasher, PasswordCost};

    fn make_state(public_credentials: Option<PublicCredentials>) -> AppState {
        let tokens = Arc::new(JwtService::new(JwtConfig::new(
            "router-test-secret",
            "mygram",
            "mygram-clients",
            3600,
        )));
        let hasher = Arc::new(
            Argon2Hasher::new(PasswordCost {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );

        AppState::new(Repositories::in_memory(), tokens, hasher, public_credentials)
    }

    async fn send(
        state: &AppState,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        create_router_with_state(state.clone())
            .oneshot(req)
            .await
            .unwrap()
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Register and log in; returns (user id, access token)
    async fn signed_in(state: &AppState, email: &str) -> (i64, String) {
        let resp = send(
            state,
            Method::POST,
            "/users/register",
            None,
            Some(json!({
                "username": email.split('@').next().unwrap(),
                "email": email,
                "password": "secret1",
                "dob": "1990-05-17"
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let id = body_json(resp).await["id"].as_i64().unwrap();

        let resp = send(
            state,
            Method::POST,
            "/users/login",
            None,
            Some(json!({"email": email, "password": "secret1"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let token = body_json(resp).await["token"].as_str().unwrap().to_string();

        (id, token)
    }

    async fn post_photo(state: &AppState, token: &str) -> i64 {
        let resp = send(
            state,
            Method::POST,
            "/photos",
            Some(token),
            Some(json!({
                "title": "beach",
                "caption": "sunset",
                "photo_url": "https://img.example.com/1.jpg"
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let state = make_state(None);

        let resp = send(&state, Method::GET, "/health", None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_public_token_open_by_default() {
        let state = make_state(None);

        let resp = send(&state, Method::GET, "/public", None, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_json(resp).await["token"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_public_token_with_basic_credentials() {
        let state = make_state(Some(PublicCredentials {
            username: "guest".to_string(),
            password: "letmein".to_string(),
        }));

        let resp = send(&state, Method::GET, "/public", None, None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = Request::builder()
            .uri("/public")
            .header(
                header::AUTHORIZATION,
                format!("Basic {}", B64.encode("guest:letmein")),
            )
            .body(Body::empty())
            .unwrap();
        let resp = create_router_with_state(state).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_token_cannot_call_resources() {
        let state = make_state(None);
        let resp = send(&state, Method::GET, "/public", None, None).await;
        let token = body_json(resp).await["token"].as_str().unwrap().to_string();

        let resp = send(&state, Method::GET, "/photos?user_id=1", Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(resp).await["errors"],
            json!(["invalid token", "not an access token"])
        );
    }

    #[tokio::test]
    async fn test_gate_failure_reasons() {
        let state = make_state(None);

        let req = Request::builder()
            .uri("/photos?user_id=1")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        let resp = create_router_with_state(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "unauthorized");
        assert_eq!(body["errors"], json!(["invalid authorization method"]));

        let resp = send(&state, Method::GET, "/photos?user_id=1", Some("garbage"), None).await;
        assert_eq!(
            body_json(resp).await["errors"],
            json!(["invalid token", "failed to decode"])
        );
    }

    #[tokio::test]
    async fn test_register_rejects_young_user() {
        let state = make_state(None);

        let resp = send(
            &state,
            Method::POST,
            "/users/register",
            None,
            Some(json!({
                "username": "kid",
                "email": "kid@example.com",
                "password": "secret1",
                "dob": "2020-01-01"
            })),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "age less than 8 years");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let state = make_state(None);

        let resp = send(
            &state,
            Method::POST,
            "/users/register",
            None,
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "12345",
                "dob": "1990-05-17"
            })),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["message"],
            "password less than 6 characters"
        );
    }

    #[tokio::test]
    async fn test_register_hides_password() {
        let state = make_state(None);
        let (id, token) = signed_in(&state, "alice@example.com").await;

        let resp = send(&state, Method::GET, &format!("/users/{}", id), Some(&token), None).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["email"], "alice@example.com");
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = make_state(None);
        signed_in(&state, "alice@example.com").await;

        let resp = send(
            &state,
            Method::POST,
            "/users/login",
            None,
            Some(json!({"email": "alice@example.com", "password": "wrong-password"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_or_bad_bearer() {
        let state = make_state(None);

        let resp = send(&state, Method::GET, "/photos?user_id=1", None, None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(&state, Method::GET, "/photos?user_id=1", Some("garbage"), None).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(body_json(resp).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_photo_lifecycle() {
        let state = make_state(None);
        let (alice_id, alice) = signed_in(&state, "alice@example.com").await;
        let photo_id = post_photo(&state, &alice).await;

        let resp = send(
            &state,
            Method::GET,
            &format!("/photos?user_id={}", alice_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed = body_json(resp).await;
        assert_eq!(listed[0]["id"], photo_id);
        assert_eq!(listed[0]["User"]["email"], "alice@example.com");

        let resp = send(
            &state,
            Method::PUT,
            &format!("/photos/{}", photo_id),
            Some(&alice),
            Some(json!({"title": "mountain", "caption": "snow", "photo_url": "https://img.example.com/2.jpg"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["title"], "mountain");

        let resp = send(
            &state,
            Method::DELETE,
            &format!("/photos/{}", photo_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(
            &state,
            Method::GET,
            &format!("/photos?user_id={}", alice_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_photo_delete_by_non_owner() {
        let state = make_state(None);
        let (_, alice) = signed_in(&state, "alice@example.com").await;
        let (_, bob) = signed_in(&state, "bob@example.com").await;
        let photo_id = post_photo(&state, &alice).await;

        let resp = send(
            &state,
            Method::DELETE,
            &format!("/photos/{}", photo_id),
            Some(&bob),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(
            &state,
            Method::PUT,
            &format!("/photos/{}", photo_id),
            Some(&bob),
            Some(json!({})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_photo_list_for_user_without_photos() {
        let state = make_state(None);
        let (alice_id, alice) = signed_in(&state, "alice@example.com").await;

        let resp = send(
            &state,
            Method::GET,
            &format!("/photos?user_id={}", alice_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_photo_validation_errors() {
        let state = make_state(None);
        let (_, alice) = signed_in(&state, "alice@example.com").await;

        let resp = send(&state, Method::POST, "/photos", Some(&alice), Some(json!({"title": "x"}))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.contains(&json!("caption is required")));
        assert!(errors.contains(&json!("photo_url is required")));
    }

    #[tokio::test]
    async fn test_update_missing_photo() {
        let state = make_state(None);
        let (_, alice) = signed_in(&state, "alice@example.com").await;

        let resp = send(
            &state,
            Method::PUT,
            "/photos/999",
            Some(&alice),
            Some(json!({"title": "a", "caption": "b", "photo_url": "c"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(&state, Method::DELETE, "/photos/999", Some(&alice), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_path_id() {
        let state = make_state(None);
        let (_, alice) = signed_in(&state, "alice@example.com").await;

        let resp = send(&state, Method::DELETE, "/photos/abc", Some(&alice), None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_comment_flow() {
        let state = make_state(None);
        let (_, alice) = signed_in(&state, "alice@example.com").await;
        let (_, bob) = signed_in(&state, "bob@example.com").await;
        let photo_id = post_photo(&state, &alice).await;

        let resp = send(
            &state,
            Method::POST,
            "/comments",
            Some(&bob),
            Some(json!({"message": "nice shot", "photo_id": photo_id})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let comment_id = body_json(resp).await["id"].as_i64().unwrap();

        let resp = send(
            &state,
            Method::GET,
            &format!("/comments?photo_id={}", photo_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed = body_json(resp).await;
        assert_eq!(listed[0]["User"]["email"], "bob@example.com");
        assert_eq!(listed[0]["Photo"]["title"], "beach");

        let resp = send(
            &state,
            Method::PUT,
            &format!("/comments/{}", comment_id),
            Some(&alice),
            Some(json!({"message": "hijacked"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(
            &state,
            Method::PUT,
            &format!("/comments/{}", comment_id),
            Some(&bob),
            Some(json!({"message": "great shot"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["message"], "great shot");
    }

    #[tokio::test]
    async fn test_comment_requires_photo_query() {
        let state = make_state(None);
        let (_, alice) = signed_in(&state, "alice@example.com").await;

        let resp = send(&state, Method::GET, "/comments", Some(&alice), None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_comment_on_missing_photo() {
        let state = make_state(None);
        let (_, alice) = signed_in(&state, "alice@example.com").await;

        let resp = send(
            &state,
            Method::POST,
            "/comments",
            Some(&alice),
            Some(json!({"message": "hello", "photo_id": 404})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_social_media_flow() {
        let state = make_state(None);
        let (alice_id, alice) = signed_in(&state, "alice@example.com").await;

        let resp = send(
            &state,
            Method::POST,
            "/socialmedias",
            Some(&alice),
            Some(json!({"name": "github", "social_media_url": "https://github.com/alice"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let link_id = body_json(resp).await["id"].as_i64().unwrap();

        let resp = send(
            &state,
            Method::GET,
            &format!("/socialmedias?user_id={}", alice_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await[0]["social_media_url"], "https://github.com/alice");

        let resp = send(
            &state,
            Method::DELETE,
            &format!("/socialmedias/{}", link_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_user_edit_and_delete_rules() {
        let state = make_state(None);
        let (alice_id, alice) = signed_in(&state, "alice@example.com").await;
        let (bob_id, bob) = signed_in(&state, "bob@example.com").await;

        let resp = send(
            &state,
            Method::PUT,
            &format!("/users/{}", alice_id),
            Some(&bob),
            Some(json!({"email": "bob2@example.com", "username": "bob"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = send(
            &state,
            Method::PUT,
            &format!("/users/{}", bob_id),
            Some(&bob),
            Some(json!({"email": "alice@example.com", "username": "bob"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(
            &state,
            Method::DELETE,
            &format!("/users/{}", alice_id),
            Some(&alice),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(
            &state,
            Method::GET,
            &format!("/users/{}", alice_id),
            Some(&bob),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
