// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Everything the mock API serves, plus what it received.
#[derive(Clone, Default)]
pub struct MockApi {
    pub students: Value,
    pub tests: Value,
    pub starts: Arc<Mutex<Vec<Value>>>,
    pub submissions: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    pub reject_start: bool,
}

/// Spawn the mock API on a random port and return its base URL.
pub async fn spawn_api(api: MockApi) -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/tests/all", get(all_tests))
        .route("/tests/{id}", get(one_test))
        .route("/tests/{id}/start", post(start_test))
        .route("/tests/{id}/submit", post(submit_test))
        .route("/students", get(all_students))
        .route("/students/{id}", get(one_student))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}

async fn login(State(api): State<MockApi>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let rollno = body["rollno"].as_str().unwrap_or_default();
    let student = api
        .students
        .as_array()
        .and_then(|all| all.iter().find(|s| s["rollno"] == rollno))
        .cloned();
    match (student, body["password"].as_str()) {
        (Some(student), Some("secret")) => (
            StatusCode::OK,
            Json(json!({ "token": format!("token-{rollno}"), "student": student })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        ),
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["rollno"] == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Student already exists" })),
        );
    }
    (StatusCode::CREATED, Json(json!({ "message": "Registered" })))
}

async fn all_tests(State(api): State<MockApi>) -> Json<Value> {
    Json(api.tests)
}

async fn one_test(State(api): State<MockApi>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let test = api
        .tests
        .as_array()
        .and_then(|all| all.iter().find(|t| t["_id"] == id.as_str()))
        .cloned();
    match test {
        Some(test) => (StatusCode::OK, Json(test)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Test not found" })),
        ),
    }
}

async fn start_test(
    State(api): State<MockApi>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    api.starts.lock().unwrap().push(body);
    if api.reject_start {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Test already attempted" })),
        );
    }
    (StatusCode::OK, Json(json!({ "message": "Test started" })))
}

async fn submit_test(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    api.submissions.lock().unwrap().push((auth, body));
    (StatusCode::OK, Json(json!({ "message": "Submitted" })))
}

async fn all_students(State(api): State<MockApi>) -> Json<Value> {
    Json(api.students)
}

async fn one_student(
    State(api): State<MockApi>,
    Path(id): Path<String>,
    Query(_query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let student = api
        .students
        .as_array()
        .and_then(|all| all.iter().find(|s| s["_id"] == id.as_str()))
        .cloned();
    match student {
        Some(student) => (StatusCode::OK, Json(student)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Student not found" })),
        ),
    }
}

pub fn student(id: &str, year: u32, branch: &str, section: &str, assigned: Value) -> Value {
    json!({
        "_id": id,
        "rollno": format!("R{id}"),
        "name": id,
        "email": format!("{id}@example.com"),
        "year": year,
        "branch": branch,
        "section": section,
        "semester": year * 2,
        "assignedTests": assigned,
    })
}

pub fn completed(test_id: &str, marks: Value, start: &str, submitted_at: Option<&str>) -> Value {
    json!({
        "testId": test_id,
        "status": "completed",
        "marks": marks,
        "start": start,
        "submittedAt": submitted_at,
    })
}

pub fn sample_test() -> Value {
    json!({
        "_id": "t1",
        "testName": "Mock Placement Test",
        "__v": 0,
        "categories": [
            {
                "_id": "c1",
                "categoryName": "Aptitude",
                "questions": [
                    {
                        "_id": "q1",
                        "question": "2 + 2?",
                        "options": ["3", "4"],
                        "correctAnswer": "4"
                    },
                    {
                        "_id": "q2",
                        "question": "3 * 3?",
                        "options": ["6", "9"],
                        "correctAnswer": "9"
                    }
                ]
            },
            {
                "_id": "c2",
                "categoryName": "Verbal",
                "questions": [
                    {
                        "_id": "q3",
                        "question": "Opposite of hot?",
                        "options": ["cold", "warm"],
                        "correctAnswer": "cold"
                    }
                ]
            }
        ]
    })
}
