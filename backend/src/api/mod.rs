//! Central module for organizing the application's resource endpoints.
//!
//! Every router in here sits behind the bearer-token layer; the anonymous
//! login route lives in [`crate::auth`].

pub mod person;
pub mod user;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::{KeySet, SigningKey};
    use crate::services::person_registry::tests::CountingStore;
    use crate::state::AppState;

    const SECRET: &str = "router-test-secret";

    fn app() -> (Router, Arc<CountingStore>) {
        let store = Arc::new(CountingStore::default());
        let state = AppState::new(
            store.clone(),
            crate::auth::service::tests::credentials(),
            KeySet::new(SigningKey::new("primary", SECRET), vec![]),
        );
        (crate::build_router(state), store)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, value)
    }

    async fn login(app: &Router) -> String {
        let (status, _, body) = send(
            app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "batman", "password": "batman" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    fn person(name: &str, region: &str) -> Value {
        json!({
            "name": name,
            "nationalId": "52998224725",
            "region": region,
            "birthDate": "1990-05-01T00:00:00"
        })
    }

    #[tokio::test]
    async fn test_login_returns_user_without_password() {
        let (app, _) = app();
        let (status, _, body) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "robin", "password": "robin" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "robin");
        assert_eq!(body["user"]["password"], "");
        assert_eq!(body["user"]["role"], "employee");

        let token = body["token"].as_str().unwrap();
        let (status, _, me) = send(&app, Method::GET, "/me", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["sub"], "robin");
        assert_eq!(me["role"], "employee");
        assert_eq!(
            me["exp"].as_i64().unwrap() - me["iat"].as_i64().unwrap(),
            2 * 3600
        );
    }

    #[tokio::test]
    async fn test_failed_login_is_404_with_uniform_message() {
        let (app, _) = app();
        let (status_a, _, body_a) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "batman", "password": "nope" })),
        )
        .await;
        let (status_b, _, body_b) = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "nobody", "password": "batman" })),
        )
        .await;
        assert_eq!(status_a, StatusCode::NOT_FOUND);
        assert_eq!(status_b, StatusCode::NOT_FOUND);
        assert_eq!(body_a, body_b);
        assert_eq!(body_a["message"], crate::auth::INVALID_CREDENTIALS_MESSAGE);
        assert!(body_a.get("token").is_none());
    }

    #[tokio::test]
    async fn test_protected_routes_reject_before_store() {
        let (app, store) = app();
        let routes = [
            (Method::GET, "/persons", None),
            (Method::GET, "/persons/GO", None),
            (Method::GET, "/persons/1", None),
            (Method::POST, "/persons", Some(person("Ana", "GO"))),
            (Method::PUT, "/persons/1", Some(json!({ "id": 1 }))),
            (Method::DELETE, "/persons/1", None),
            (Method::GET, "/me", None),
        ];
        for (method, uri, body) in routes {
            let (status, _, _) = send(&app, method.clone(), uri, None, body.clone()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);

            let (status, _, _) =
                send(&app, method.clone(), uri, Some("not-a-token"), body).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_rejected() {
        let (app, store) = app();
        let foreign = crate::auth::TokenService::new(
            KeySet::new(SigningKey::new("primary", "another-secret"), vec![]),
            crate::auth::service::tests::credentials(),
        );
        let token = foreign
            .login("batman", "batman")
            .await
            .unwrap()
            .token;
        let (status, _, _) = send(&app, Method::GET, "/persons", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_health_is_anonymous() {
        let (app, _) = app();
        let (status, _, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_person_crud_flow() {
        let (app, _) = app();
        let token = login(&app).await;
        let token = Some(token.as_str());

        let (status, headers, created) =
            send(&app, Method::POST, "/persons", token, Some(person("Ana", "GO"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(headers[header::LOCATION], "/persons/1");

        send(&app, Method::POST, "/persons", token, Some(person("Bia", "sp"))).await;

        let (status, _, fetched) = send(&app, Method::GET, "/persons/1", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (_, _, all) = send(&app, Method::GET, "/persons", token, None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, _, lower) = send(&app, Method::GET, "/persons/go", token, None).await;
        let (_, _, upper) = send(&app, Method::GET, "/persons/GO", token, None).await;
        assert_eq!(lower, upper);
        assert_eq!(lower.as_array().unwrap().len(), 1);

        let (status, _, empty) = send(&app, Method::GET, "/persons/RJ", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty, json!([]));

        let mut changed = created.clone();
        changed["name"] = json!("Ana Maria");
        let (status, _, updated) =
            send(&app, Method::PUT, "/persons/1", token, Some(changed.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Ana Maria");

        let (status, _, _) =
            send(&app, Method::PUT, "/persons/2", token, Some(changed.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut missing = changed.clone();
        missing["id"] = json!(99);
        let (status, _, _) = send(&app, Method::PUT, "/persons/99", token, Some(missing)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, deleted) = send(&app, Method::DELETE, "/persons/1", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["name"], "Ana Maria");

        let (status, _, _) = send(&app, Method::GET, "/persons/1", token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = send(&app, Method::DELETE, "/persons/1", token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_validation_errors_are_400() {
        let (app, _) = app();
        let token = login(&app).await;
        let token = Some(token.as_str());

        let bad_length = json!({ "name": "Ana", "nationalId": "123" });
        let bad_checksum = json!({ "name": "Ana", "nationalId": "52998224726" });
        let placeholder = json!({ "name": "Ana", "nationalId": "00000000000" });
        let all_missing = json!({ "nationalId": "52998224725" });
        for body in [bad_length, bad_checksum, placeholder, all_missing] {
            let (status, _, error) =
                send(&app, Method::POST, "/persons", token, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(error["message"].is_string());
        }

        let only_region = json!({ "nationalId": "52998224725", "region": "GO" });
        let (status, _, _) = send(&app, Method::POST, "/persons", token, Some(only_region)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unreadable_person_body_is_400_json() {
        let (app, store) = app();
        let token = login(&app).await;
        let token = Some(token.as_str());

        let bad_date = json!({
            "name": "Ana",
            "nationalId": "52998224725",
            "birthDate": "not-a-date"
        });
        let numeric_id = json!({ "name": "Ana", "nationalId": 52998224725u64 });
        let null_id = json!({ "name": "Ana", "nationalId": null });
        for body in [bad_date, numeric_id, null_id] {
            let (status, _, error) =
                send(&app, Method::POST, "/persons", token, Some(body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
            assert!(error["message"].is_string(), "{}", body);
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_path_id_is_400_json() {
        let (app, store) = app();
        let token = login(&app).await;
        let token = Some(token.as_str());

        let (status, _, error) =
            send(&app, Method::PUT, "/persons/abc", token, Some(person("Ana", "GO"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["message"].is_string());

        let (status, _, error) = send(&app, Method::DELETE, "/persons/abc", token, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["message"].is_string());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_login_body_is_400_json() {
        let (app, _) = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"username\": \"batman\""))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["message"].is_string());
        assert!(body.get("token").is_none());
    }
}
