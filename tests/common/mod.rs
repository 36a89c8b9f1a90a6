#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use gym_churn::api::routes::{create_routes, AppState};
use gym_churn::models::CreateMember;
use gym_churn::services::{ChurnClassifier, LogisticChurnModel};
use gym_churn::storage::InMemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a fresh in-memory store with the given classifier.
pub fn test_app_with(classifier: Arc<dyn ChurnClassifier>) -> Router {
    let store = Arc::new(InMemoryStore::new());
    create_routes(AppState::new(store.clone(), store, classifier))
}

/// Router whose classifier always answers 0.5.
pub fn test_app() -> Router {
    test_app_with(Arc::new(LogisticChurnModel::new("flat_test", 0.0, [0.0; 4])))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    let request = match body {
        Some(body_data) => builder.body(Body::from(body_data.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn member(email: &str) -> CreateMember {
        CreateMember {
            name: "Fernanda Costa".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1993, 11, 8).unwrap(),
            gender: "F".to_string(),
            email: email.to_string(),
            plan_id: 2,
            enrollment_start: Utc::now().date_naive() - Duration::days(30),
            enrollment_active: true,
            cancellation_date: None,
        }
    }

    pub fn member_json(member: &CreateMember) -> Value {
        json!(member)
    }
}

pub async fn register(app: &Router, member: &CreateMember) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/members",
        Some(MockDataGenerator::member_json(member)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    body["id"].as_i64().unwrap()
}
