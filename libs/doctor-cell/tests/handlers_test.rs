use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use doctor_cell::router::doctor_routes;
use shared_models::{Profile, User};
use shared_store::{AppState, StoreError};

async fn test_app() -> (Router, Uuid) {
    let state = AppState::in_memory().await;
    let doctor_id = Uuid::new_v4();
    state
        .store
        .write(|data| {
            data.users.push(User {
                id: doctor_id,
                email: "doc@example.com".to_string(),
                name: "Dr. Test".to_string(),
                profile: Profile::Doctor {
                    specialty: "Orthodontics".to_string(),
                    availability: Vec::new(),
                },
            });
            Ok::<_, StoreError>(())
        })
        .await
        .unwrap();
    (doctor_routes(state), doctor_id)
}

fn tomorrow_string() -> String {
    (Utc::now().date_naive() + Duration::days(1)).to_string()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_doctors_returns_seeded_doctor() {
    let (app, _doctor_id) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["doctors"][0]["role"], "DOCTOR");
    assert_eq!(body["doctors"][0]["specialty"], "Orthodontics");
}

#[tokio::test]
async fn add_availability_accepts_future_slot() {
    let (app, doctor_id) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/{}/availability", doctor_id))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "date": tomorrow_string(), "time": "09:00:00" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_booked"], false);
}

#[tokio::test]
async fn duplicate_availability_is_a_bad_request() {
    let (app, doctor_id) = test_app().await;

    let request = || {
        Request::builder()
            .method("POST")
            .uri(format!("/{}/availability", doctor_id))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "date": tomorrow_string(), "time": "09:00:00" }).to_string(),
            ))
            .unwrap()
    };

    let first = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.oneshot(request()).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn availability_for_unknown_doctor_is_not_found() {
    let (app, _doctor_id) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}/availability", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
