mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use authgate::router::init_router;
use authgate::state::AppState;
use common::{TEST_ADMIN_EMAIL, create_test_user, generate_unique_email, test_state};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Login through the OTP flow and return an access token.
async fn access_token_for(state: &AppState, email: &str, password: &str) -> String {
    let app = init_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({"email": email, "password": password})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let code = state.otp_store.pending_code(email).unwrap();

    let app = init_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/verify-otp")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({"email": email, "code": code})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    body["tokens"]["access"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile(pool: PgPool) {
    let state = test_state(pool.clone());
    let email = generate_unique_email();
    create_test_user(&pool, &email, "Correct1!pass").await;

    let token = access_token_for(&state, &email, "Correct1!pass").await;

    let app = init_router(state);
    let response = app
        .oneshot(bearer_request("GET", "/api/users/profile", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["full_name"], "Test User");
    assert_eq!(body["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_requires_token(pool: PgPool) {
    let state = test_state(pool);
    let app = init_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_description(pool: PgPool) {
    let state = test_state(pool.clone());
    let email = generate_unique_email();
    create_test_user(&pool, &email, "Correct1!pass").await;

    let token = access_token_for(&state, &email, "Correct1!pass").await;

    let app = init_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/profile")
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({"description": "Updated description"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let app = init_router(state);
    let response = app
        .oneshot(bearer_request("GET", "/api/users/profile", &token))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["description"], "Updated description");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_description_missing_key(pool: PgPool) {
    let state = test_state(pool.clone());
    let email = generate_unique_email();
    create_test_user(&pool, &email, "Correct1!pass").await;

    let token = access_token_for(&state, &email, "Correct1!pass").await;

    let app = init_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/profile")
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("description"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_user(pool: PgPool) {
    let state = test_state(pool.clone());
    let email = generate_unique_email();
    create_test_user(&pool, &email, "Correct1!pass").await;

    let token = access_token_for(&state, &email, "Correct1!pass").await;

    let app = init_router(state.clone());
    let response = app
        .oneshot(bearer_request("DELETE", "/api/users/deactivate", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["message"], "User deactivated");

    // the identity row survives, but logins take the uniform rejection path
    let app = init_router(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({"email": email, "password": "Correct1!pass"}))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_requires_admin(pool: PgPool) {
    let state = test_state(pool.clone());
    let email = generate_unique_email();
    create_test_user(&pool, &email, "Correct1!pass").await;

    let token = access_token_for(&state, &email, "Correct1!pass").await;

    let app = init_router(state);
    let response = app
        .oneshot(bearer_request("GET", "/api/users", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_as_admin(pool: PgPool) {
    let state = test_state(pool.clone());
    create_test_user(&pool, TEST_ADMIN_EMAIL, "Admin1!pass").await;
    for _ in 0..4 {
        create_test_user(&pool, &generate_unique_email(), "Other1!pass").await;
    }

    let token = access_token_for(&state, TEST_ADMIN_EMAIL, "Admin1!pass").await;

    let app = init_router(state);
    let response = app
        .oneshot(bearer_request("GET", "/api/users?limit=3&page=1", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["has_more"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_claim_in_issued_tokens(pool: PgPool) {
    let state = test_state(pool.clone());
    create_test_user(&pool, TEST_ADMIN_EMAIL, "Admin1!pass").await;
    let other_email = generate_unique_email();
    create_test_user(&pool, &other_email, "Other1!pass").await;

    let admin_token = access_token_for(&state, TEST_ADMIN_EMAIL, "Admin1!pass").await;
    let other_token = access_token_for(&state, &other_email, "Other1!pass").await;

    let admin_claims =
        authgate::utils::jwt::verify_token(&admin_token, &state.jwt_config).unwrap();
    let other_claims =
        authgate::utils::jwt::verify_token(&other_token, &state.jwt_config).unwrap();

    assert!(admin_claims.is_admin);
    assert!(!other_claims.is_admin);
}
