use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use mhs::domain::config::ApiConfig;
use mhs_server::Server;
use serde_json::Value;
use tower::ServiceExt;

fn app_with(cfg: ApiConfig) -> Router {
    Server::builder().config(cfg).build().expect("server should build").router()
}

fn app() -> Router {
    app_with(ApiConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

async fn participants(app: &Router, activity: &str) -> Vec<String> {
    let (status, body) = send(app, Method::GET, "/activities").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body[activity]["participants"].clone()).expect("participants array")
}

fn detail(body: &Value) -> String {
    body["detail"].as_str().expect("detail string").to_lowercase()
}

#[tokio::test]
async fn root_redirects_to_the_landing_page() {
    let request = Request::builder().uri("/").body(Body::empty()).expect("request");
    let response = app().oneshot(request).await.expect("infallible");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/static/index.html");
}

#[tokio::test]
async fn lists_every_activity_with_all_fields() {
    let (status, body) = send(&app(), Method::GET, "/activities").await;

    assert_eq!(status, StatusCode::OK);
    let activities = body.as_object().expect("object keyed by name");
    assert_eq!(activities.len(), 9);
    for name in ["Soccer Team", "Basketball Club", "Drama Club", "Chess Club", "Programming Class"] {
        let activity = &activities[name];
        for field in ["description", "schedule", "max_participants", "participants"] {
            assert!(activity.get(field).is_some(), "{name} lacks {field}");
        }
    }
}

#[tokio::test]
async fn signup_adds_the_participant() {
    let app = app();

    let (status, body) =
        send(&app, Method::POST, "/activities/Soccer%20Team/signup?email=test@mergington.edu").await;

    assert_eq!(status, StatusCode::OK);
    let message = body["message"].as_str().expect("message");
    assert!(message.contains("test@mergington.edu"));
    assert!(message.contains("Soccer Team"));
    assert!(participants(&app, "Soccer Team").await.contains(&"test@mergington.edu".to_owned()));
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = app();
    let uri = "/activities/Soccer%20Team/signup?email=duplicate@mergington.edu";

    let (first, _) = send(&app, Method::POST, uri).await;
    let (second, body) = send(&app, Method::POST, uri).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert!(detail(&body).contains("already signed up"));
}

#[tokio::test]
async fn unknown_activity_is_not_found() {
    let app = app();

    let (status, body) =
        send(&app, Method::POST, "/activities/Nonexistent%20Activity/signup?email=test@mergington.edu")
            .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(detail(&body).contains("not found"));

    let (status, _) = send(&app, Method::POST, "/activities/Nonexistent%20Activity/signup?email=bogus").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/activities/Nonexistent%20Activity/unregister?email=test@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(detail(&body).contains("not found"));
}

#[tokio::test]
async fn unregister_removes_a_seeded_participant() {
    let app = app();

    let (status, body) =
        send(&app, Method::DELETE, "/activities/Soccer%20Team/unregister?email=alex@mergington.edu")
            .await;

    assert_eq!(status, StatusCode::OK);
    let message = body["message"].as_str().expect("message");
    assert!(message.contains("alex@mergington.edu"));
    assert!(message.contains("Soccer Team"));
    assert!(!participants(&app, "Soccer Team").await.contains(&"alex@mergington.edu".to_owned()));
}

#[tokio::test]
async fn unregister_of_absent_student_is_not_registered() {
    let (status, body) = send(
        &app(),
        Method::DELETE,
        "/activities/Soccer%20Team/unregister?email=notregistered@mergington.edu",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(detail(&body).contains("not registered"));
}

#[tokio::test]
async fn signup_then_unregister_restores_the_count() {
    let app = app();
    let initial = participants(&app, "Drama Club").await.len();

    let (status, _) = send(&app, Method::POST, "/activities/Drama%20Club/signup?email=flow@mergington.edu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participants(&app, "Drama Club").await.len(), initial + 1);

    let (status, _) =
        send(&app, Method::DELETE, "/activities/Drama%20Club/unregister?email=flow@mergington.edu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(participants(&app, "Drama Club").await.len(), initial);
}

#[tokio::test]
async fn missing_or_malformed_email_is_unprocessable() {
    let app = app();

    for (method, uri) in [
        (Method::POST, "/activities/Soccer%20Team/signup"),
        (Method::DELETE, "/activities/Soccer%20Team/unregister"),
        (Method::POST, "/activities/Nonexistent/signup"),
        (Method::POST, "/activities/Soccer%20Team/signup?email="),
        (Method::POST, "/activities/Soccer%20Team/signup?email=no-at-sign"),
        (Method::DELETE, "/activities/Soccer%20Team/unregister?email=a@b@c"),
        (Method::POST, "/activities/Soccer%20Team/signup?email=a@x.edu&email=b@x.edu"),
        (Method::DELETE, "/activities/Soccer%20Team/unregister?email=a@x.edu&email=b@x.edu"),
        (Method::POST, "/activities/Soccer%20Team/signup?email=%FF@mergington.edu"),
        (Method::POST, "/activities/Soccer%20Team/signup?email=al%00ex@mergington.edu"),
    ] {
        let (status, body) = send(&app, method, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert!(body["detail"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn one_student_can_join_several_activities() {
    let app = app();
    let activities = ["Soccer%20Team", "Chess%20Club", "Programming%20Class"];

    for activity in activities {
        let uri = format!("/activities/{activity}/signup?email=multi@mergington.edu");
        let (status, _) = send(&app, Method::POST, &uri).await;
        assert_eq!(status, StatusCode::OK, "{activity}");
    }

    for activity in ["Soccer Team", "Chess Club", "Programming Class"] {
        assert!(participants(&app, activity).await.contains(&"multi@mergington.edu".to_owned()));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_signups_are_all_recorded() {
    let app = app();
    let before = participants(&app, "Chess Club").await.len();

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let uri = format!("/activities/Chess%20Club/signup?email=student{i}@mergington.edu");
                send(&app, Method::POST, &uri).await.0
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.expect("task"), StatusCode::OK);
    }

    let after = participants(&app, "Chess Club").await;
    assert_eq!(after.len(), before + 32);
    for i in 0..32 {
        assert!(after.contains(&format!("student{i}@mergington.edu")));
    }
}

#[tokio::test]
async fn single_activity_endpoint() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/activities/Chess%20Club").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max_participants"], 12);

    let (status, body) = send(&app, Method::GET, "/activities/Knitting").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(detail(&body).contains("not found"));
}

#[tokio::test]
async fn health_reports_up() {
    let (status, body) = send(&app(), Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn api_reference_is_served() {
    let request = Request::builder().uri("/api").body(Body::empty()).expect("request");
    let response = app().oneshot(request).await.expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn static_files_come_from_the_configured_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("index.html"), "<h1>Mergington High School</h1>").expect("write");
    let mut cfg = ApiConfig::default();
    cfg.storage.static_dir = dir.path().to_path_buf();
    let app = app_with(cfg);

    let (status, body) = send(&app, Method::GET, "/static/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().is_some_and(|html| html.contains("Mergington")));

    let (status, _) = send(&app, Method::GET, "/static/missing.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
