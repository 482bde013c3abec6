use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;

use common::{HangingMailer, RecordingMailer, create_test_app};

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/send-email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn assert_cors(response: &axum::response::Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

#[tokio::test]
async fn test_post_sends_exactly_one_email() {
    // Arrange
    let mailer = RecordingMailer::default();
    let app = create_test_app(mailer.clone());

    // Act
    let response = app
        .oneshot(post_json(json!({
            "name": "Ayşe Yılmaz",
            "phone": "5551234567",
            "message": "Teklif istiyorum"
        })))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Email sent successfully" })
    );

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Yeni İletişim Formu Mesajı");
    assert_eq!(sent[0].to, "mervoltelektrik@gmail.com");
    assert_eq!(sent[0].from, "site@mervolt.test");
    assert!(sent[0].html.contains("Ayşe Yılmaz"));
    assert!(sent[0].html.contains("5551234567"));
    assert!(sent[0].html.contains("Teklif istiyorum"));
}

#[tokio::test]
async fn test_other_methods_are_rejected_without_sending() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let mailer = RecordingMailer::default();
        let app = create_test_app(mailer.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri("/api/send-email")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_cors(&response);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Method not allowed" })
        );
        assert!(mailer.sent().is_empty());
    }
}

#[tokio::test]
async fn test_options_preflight_is_empty_ok() {
    let mailer = RecordingMailer::default();
    let app = create_test_app(mailer.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/send-email")
                .header(header::ORIGIN, "https://mervolt.com.tr")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::from(r#"{"name":"ignored"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_dispatch_failure_returns_generic_500() {
    let mailer = RecordingMailer::failing();
    let app = create_test_app(mailer.clone());

    let response = app
        .oneshot(post_json(json!({
            "name": "Ali",
            "phone": "5550000000",
            "message": "Pano arızası"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(&response);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Failed to send email" }));
    // provider detail must not leak
    assert!(!body.to_string().contains("535"));
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_hanging_provider_times_out_as_500() {
    let app = create_test_app(HangingMailer);

    let response = app
        .oneshot(post_json(json!({
            "name": "Ali",
            "phone": "5550000000",
            "message": "Acil"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Failed to send email" })
    );
}

#[tokio::test]
async fn test_missing_fields_are_rejected_before_dispatch() {
    let mailer = RecordingMailer::default();
    let app = create_test_app(mailer.clone());

    let response = app
        .oneshot(post_json(json!({ "name": "Ali", "phone": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Missing required fields: message, phone" })
    );
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let mailer = RecordingMailer::default();
    let app = create_test_app(mailer.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/send-email")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Invalid request body" })
    );
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_markup_in_fields_is_escaped_in_email() {
    let mailer = RecordingMailer::default();
    let app = create_test_app(mailer.clone());

    let response = app
        .oneshot(post_json(json!({
            "name": "<img src=x onerror=alert(1)>",
            "phone": "555",
            "message": "<b>merhaba</b>"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = mailer.sent();
    assert!(!sent[0].html.contains("<img"));
    assert!(!sent[0].html.contains("<b>merhaba"));
    assert!(sent[0].html.contains("&lt;b&gt;merhaba&lt;/b&gt;"));
}

#[tokio::test]
async fn test_concurrent_posts_each_dispatch_once() {
    let mailer = RecordingMailer::default();
    let app = create_test_app(mailer.clone());

    let requests = (0..5).map(|i| {
        let app = app.clone();
        async move {
            app.oneshot(post_json(json!({
                "name": format!("Müşteri {i}"),
                "phone": "5551234567",
                "message": "Teklif"
            })))
            .await
            .unwrap()
            .status()
        }
    });

    let statuses = futures::future::join_all(requests).await;

    assert!(statuses.iter().all(|s| *s == StatusCode::OK));
    assert_eq!(mailer.sent().len(), 5);
}

#[tokio::test]
async fn test_long_message_is_relayed() {
    let mailer = RecordingMailer::default();
    let app = create_test_app(mailer.clone());
    let message = "x".repeat(2001);

    let response = app
        .oneshot(post_json(json!({
            "name": "Ali",
            "phone": "5551234567",
            "message": message
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].html.contains(&message));
}
