#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use dailymenu::api::AppState;
use dailymenu::config::Config;
use dailymenu::services::Registration;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

pub struct TestApp {
    pub app: NormalizePath<Router>,
    pub state: Arc<AppState>,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let state = dailymenu::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = dailymenu::api::app(state.clone()).await;
    TestApp { app, state }
}

impl TestApp {
    /// Registers a user directly through the service and returns their token.
    pub async fn user_token(&self, email: &str, is_staff: bool) -> String {
        let password = "password123";
        self.state
            .auth_service()
            .register(Registration {
                email: email.to_string(),
                password: password.to_string(),
                name: String::new(),
                is_staff,
                is_superuser: false,
            })
            .await
            .expect("Failed to register user");

        self.state
            .auth_service()
            .obtain_token(email, password)
            .await
            .expect("Failed to obtain token")
    }

    pub async fn staff_token(&self) -> String {
        self.user_token("staff@example.com", true).await
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Token {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, token, Some(body)).await
    }

    /// Creates an option as staff and returns its id.
    pub async fn create_option(&self, token: &str, description: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/options",
                Some(token),
                serde_json::json!({ "description": description }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Creates a menu as staff and returns its id.
    pub async fn create_menu(&self, token: &str, date: &str, options: &[i64]) -> i64 {
        let (status, body) = self
            .post(
                "/api/menus",
                Some(token),
                serde_json::json!({ "date": date, "options": options }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

/// Option ids of a menu in either shape, sorted.
pub fn option_ids(menu: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = menu["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_i64().or_else(|| o["id"].as_i64()).unwrap())
        .collect();
    ids.sort_unstable();
    ids
}
