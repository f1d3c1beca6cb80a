use http_body_util::BodyExt;

use axum::{
    body::Body,
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN},
        Method, Request, StatusCode,
    },
    Router,
};
use chatdeck_config::DatabaseConfig;
use chatdeck_database::initialize_database;
use chatdeck_gateway::{create_router, GatewayState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestContext {
    _temp_dir: TempDir,
    router: Router,
}

impl TestContext {
    async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("gateway.db").display()),
            max_connections: 4,
        };
        let db = initialize_database(&config).await.unwrap();

        Self {
            router: create_router(GatewayState::new(db)),
            _temp_dir: temp_dir,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_chat(&self, title: &str, chat_type: &str) -> i64 {
        let (status, body) = self
            .send(Method::POST, "/api/chats", Some(json!({"title": title, "type": chat_type})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    async fn create_participant(&self, name: &str) -> i64 {
        let (status, body) = self
            .send(Method::POST, "/api/participants", Some(json!({"name": name})))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx.send(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn chat_lifecycle_over_http() {
    let ctx = TestContext::new().await;

    let (status, chats) = ctx.send(Method::GET, "/api/chats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chats, json!([]));

    let chat_id = ctx.create_chat("Test Chat", "smart_answer").await;
    assert_eq!(chat_id, 1);

    let (status, message) = ctx
        .send(
            Method::POST,
            "/api/messages",
            Some(json!({"chat_id": chat_id, "content": "hi", "role": "user"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message["participant_id"], Value::Null);

    let (_, messages) = ctx.send(Method::GET, "/api/chats/1/messages", None).await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["content"], "hi");
    assert_eq!(messages[0]["role"], "user");

    let (status, _) = ctx.send(Method::DELETE, "/api/chats/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, chat) = ctx.send(Method::GET, "/api/chats/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chat, Value::Null);

    let (_, messages) = ctx.send(Method::GET, "/api/chats/1/messages", None).await;
    assert_eq!(messages, json!([]));
}

#[tokio::test]
async fn update_chat_without_title_keeps_title() {
    let ctx = TestContext::new().await;
    let chat_id = ctx.create_chat("Original Title", "autopilot").await;
    let (_, before) = ctx.send(Method::GET, &format!("/api/chats/{chat_id}"), None).await;

    let (status, after) = ctx
        .send(Method::PUT, &format!("/api/chats/{chat_id}"), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["title"], "Original Title");
    assert_eq!(after["type"], "autopilot");
    // fixed-width RFC 3339 strings compare chronologically
    assert!(after["updated_at"].as_str().unwrap() > before["updated_at"].as_str().unwrap());
}

#[tokio::test]
async fn bodiless_update_touches_chat() {
    let ctx = TestContext::new().await;
    let chat_id = ctx.create_chat("Original Title", "group_chat").await;
    let (_, before) = ctx.send(Method::GET, &format!("/api/chats/{chat_id}"), None).await;

    let (status, after) = ctx.send(Method::PUT, &format!("/api/chats/{chat_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["title"], "Original Title");
    assert_eq!(after["created_at"], before["created_at"]);
    assert!(after["updated_at"].as_str().unwrap() > before["updated_at"].as_str().unwrap());
}

#[tokio::test]
async fn malformed_update_body_is_bad_request() {
    let ctx = TestContext::new().await;
    let chat_id = ctx.create_chat("Keep", "smart_answer").await;

    let (status, body) = ctx
        .send(Method::PUT, &format!("/api/chats/{chat_id}"), Some(json!({"title": 5})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "400");
    let (_, chat) = ctx.send(Method::GET, &format!("/api/chats/{chat_id}"), None).await;
    assert_eq!(chat["title"], "Keep");
}

#[tokio::test]
async fn non_numeric_id_gets_error_body() {
    let ctx = TestContext::new().await;

    for uri in ["/api/chats/abc", "/api/chats/abc/messages", "/api/chats/1/participants/x"] {
        let method = if uri.ends_with("/x") { Method::DELETE } else { Method::GET };
        let (status, body) = ctx.send(method, uri, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "400");
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request"));
    }
}

#[tokio::test]
async fn update_missing_chat_is_not_found() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx
        .send(Method::PUT, "/api/chats/77", Some(json!({"title": "x"})))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "404");
    assert!(body["message"].as_str().unwrap().contains("77"));
}

#[tokio::test]
async fn unknown_chat_type_is_rejected() {
    let ctx = TestContext::new().await;
    let (status, _) = ctx
        .send(Method::POST, "/api/chats", Some(json!({"title": "bad", "type": "broadcast"})))
        .await;

    assert!(status.is_client_error());
    let (_, chats) = ctx.send(Method::GET, "/api/chats", None).await;
    assert_eq!(chats, json!([]));
}

#[tokio::test]
async fn message_for_missing_chat_is_not_found() {
    let ctx = TestContext::new().await;
    let (status, body) = ctx
        .send(
            Method::POST,
            "/api/messages",
            Some(json!({"chat_id": 5, "content": "lost", "role": "system"})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains('5'));
}

#[tokio::test]
async fn membership_flow_over_http() {
    let ctx = TestContext::new().await;
    let chat_id = ctx.create_chat("Team", "group_chat").await;
    let first = ctx.create_participant("First").await;
    let second = ctx.create_participant("Second").await;

    for participant_id in [second, first] {
        let (status, membership) = ctx
            .send(
                Method::POST,
                "/api/chat-participants",
                Some(json!({"chat_id": chat_id, "participant_id": participant_id})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(membership["participant_id"], participant_id);
    }

    let (status, body) = ctx
        .send(
            Method::POST,
            "/api/chat-participants",
            Some(json!({"chat_id": chat_id, "participant_id": first})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "409");

    let (_, members) = ctx
        .send(Method::GET, &format!("/api/chats/{chat_id}/participants"), None)
        .await;
    let names: Vec<&str> = members
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);

    let uri = format!("/api/chats/{chat_id}/participants/{second}");
    let (status, _) = ctx.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = ctx.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, participants) = ctx.send(Method::GET, "/api/participants", None).await;
    assert_eq!(participants.as_array().unwrap().len(), 2);
    assert_eq!(participants[0]["name"], "Second");
}

#[tokio::test]
async fn add_to_missing_chat_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.create_participant("Lonely").await;

    let (status, body) = ctx
        .send(
            Method::POST,
            "/api/chat-participants",
            Some(json!({"chat_id": 999, "participant_id": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let ctx = TestContext::new().await;
    let (status, doc) = ctx.send(Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/chats"].is_object());
    assert!(doc["paths"]["/api/chat-participants"].is_object());
    assert!(doc["components"]["schemas"]["ErrorResponse"].is_object());
    assert_eq!(
        doc["paths"]["/api/chats"]["get"]["responses"]["500"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/ErrorResponse"
    );
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let ctx = TestContext::new().await;
    let request = Request::builder()
        .uri("/api/chats")
        .header(ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = ctx.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
