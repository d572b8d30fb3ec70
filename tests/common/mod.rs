#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use market_ai_suite::config::Config;
use market_ai_suite::api::handlers::AppState;
use market_ai_suite::api::routes::build_router;
use market_ai_suite::core::models::{Lead, User};
use market_ai_suite::data::store::MemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

/// Config pointing at `groq_base_url` with the given key.
pub fn test_config(groq_base_url: &str, api_key: Option<&str>) -> Config {
    Config {
        port: 3000,
        groq_api_key: api_key.map(str::to_string),
        groq_base_url: groq_base_url.to_string(),
        groq_model: "llama-3.3-70b-versatile".to_string(),
        data_dir: std::env::temp_dir().join("market-ai-suite-unused"),
        public_dir: std::env::temp_dir().join("market-ai-suite-no-public"),
        debug_env_enabled: true,
    }
}

pub struct TestApp {
    pub router: Router,
    pub leads: Arc<MemoryStore<Lead>>,
    pub users: Arc<MemoryStore<User>>,
}

/// Router over in-memory stores.
pub fn memory_app(config: Config, seed: Vec<Lead>) -> TestApp {
    let leads = Arc::new(MemoryStore::with_records(seed));
    let users = Arc::new(MemoryStore::<User>::new());
    let state = Arc::new(AppState::new(config, leads.clone(), users.clone()));
    TestApp {
        router: build_router(state),
        leads,
        users,
    }
}

/// Sends one request and returns status plus parsed JSON body (Null when empty).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

pub fn lead(name: &str, company: &str, score: i64, label: Option<&str>) -> Lead {
    Lead {
        name: name.to_string(),
        company: company.to_string(),
        budget: None,
        history: Some("Seed".to_string()),
        score,
        label: label.map(str::to_string),
        extra: Default::default(),
    }
}
