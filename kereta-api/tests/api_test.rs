use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use kereta_api::{app, AppState};
use kereta_assistant::gemini::{Content, FunctionCall, Part};
use kereta_assistant::{AssistantError, ChatModel};
use kereta_store::app_config::CorsConfig;
use kereta_store::{InMemoryOrderRepository, InMemorySessionRepository};

/// Replays canned model turns in order.
struct ScriptedModel {
    replies: Mutex<VecDeque<Content>>,
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn generate(&self, _contents: &[Content]) -> Result<Content, AssistantError> {
        self.replies.lock().await.pop_front().ok_or(AssistantError::EmptyResponse)
    }
}

fn router(model: Option<Vec<Content>>, seed_demo_order: bool) -> Router {
    let orders = if seed_demo_order {
        InMemoryOrderRepository::with_demo_order()
    } else {
        InMemoryOrderRepository::new()
    };
    let model = model.map(|replies| {
        Arc::new(ScriptedModel { replies: Mutex::new(replies.into()) }) as Arc<dyn ChatModel>
    });
    let state = AppState::new(Arc::new(orders), Arc::new(InMemorySessionRepository::new()), model, 4);
    app(state, &CorsConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

fn passenger(name: &str, id: &str) -> Value {
    json!({"name": name, "idNumber": id})
}

#[tokio::test]
async fn test_search_routes_direct_and_alternative() {
    let app = router(None, false);
    let (status, body) = send(&app, Method::POST, "/api/search-routes", Some(json!({
        "origin": "Jakarta", "destination": "Surabaya", "date": "2024-08-15"
    }))).await;

    assert_eq!(status, StatusCode::OK);
    let direct = body["direct_routes"].as_array().unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0]["train_id"], "KAI001");
    assert_eq!(direct[0]["date"], "2024-08-15");

    let alternatives = body["alternative_routes"].as_array().unwrap();
    assert_eq!(alternatives.len(), 1);
    assert_eq!(alternatives[0]["totalPrice"], 550000);
    assert_eq!(alternatives[0]["transfers"], 1);
    assert_eq!(alternatives[0]["legs"][0]["date"], "2024-08-15");
}

#[tokio::test]
async fn test_search_routes_unknown_city_is_empty() {
    let app = router(None, false);
    let (status, body) = send(&app, Method::POST, "/api/search-routes", Some(json!({
        "origin": "Medan", "destination": "Padang", "date": "2024-08-15"
    }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"direct_routes": [], "alternative_routes": []}));
}

#[tokio::test]
async fn test_book_ticket_then_list_and_fetch() {
    let app = router(None, true);
    let (status, body) = send(&app, Method::POST, "/api/book-ticket", Some(json!({
        "train_id": "KAI004",
        "date": "2024-09-01",
        "passengers": 2,
        "passengers_info": [passenger("Ani", "111"), passenger("Budi", "222")]
    }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let order_id = body["orderId"].as_str().unwrap().to_string();
    assert!(order_id.starts_with("TRX"));
    assert_eq!(body["orderDetails"]["price"], 1040000);
    assert_eq!(body["orderDetails"]["status"], "confirmed");
    assert_eq!(body["orderDetails"]["isAlternative"], false);

    let (_, orders) = send(&app, Method::GET, "/api/my-orders", None).await;
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], "TRX1722784264");
    assert_eq!(orders[1]["id"], order_id.as_str());

    let (status, order) = send(&app, Method::GET, &format!("/api/orders/{}", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["trainName"], "Argo Lawu");
    assert_eq!(order["passengersInfo"][1]["idNumber"], "222");
}

#[tokio::test]
async fn test_book_ticket_rejects_unknown_train_and_zero_passengers() {
    let app = router(None, false);
    let (status, body) = send(&app, Method::POST, "/api/book-ticket", Some(json!({
        "train_id": "KAI999", "date": "2024-09-01", "passengers": 1
    }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Train with ID KAI999 not found.");

    let (status, body) = send(&app, Method::POST, "/api/book-ticket", Some(json!({
        "train_id": "KAI001", "date": "2024-09-01", "passengers": 0
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let (_, orders) = send(&app, Method::GET, "/api/my-orders", None).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_book_alternative_route() {
    let app = router(None, false);
    let (_, search) = send(&app, Method::POST, "/api/search-routes", Some(json!({
        "origin": "jakarta", "destination": "yogyakarta", "date": "2024-08-20"
    }))).await;
    let route = search["alternative_routes"][0].clone();

    let (status, body) = send(&app, Method::POST, "/api/book-alternative-route", Some(json!({
        "route": route,
        "passengers": 1,
        "passengersInfo": [passenger("Citra", "333")],
        "selectedSeats": {"0": ["A1"], "1": ["B2"]},
        "totalPrice": 420000
    }))).await;

    assert_eq!(status, StatusCode::OK);
    let order = &body["orderDetails"];
    assert_eq!(order["isAlternative"], true);
    assert_eq!(order["trainName"], "Alternative: Jakarta - Yogyakarta");
    assert_eq!(order["price"], 420000);
    assert_eq!(order["legs"].as_array().unwrap().len(), 2);
    assert_eq!(order["legs"][0]["time"], "09:00 - 12:15");
    assert_eq!(order["legs"][1]["seats"], json!(["B2"]));
}

#[tokio::test]
async fn test_unknown_order_is_404() {
    let app = router(None, true);
    let (status, body) = send(&app, Method::GET, "/api/orders/TRX0-0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Order with ID TRX0-0 not found.");
}

#[tokio::test]
async fn test_chat_disabled_without_model() {
    let app = router(None, false);
    let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({
        "message": "halo", "conversation_history": [], "session_id": "s1"
    }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].as_str().unwrap().contains("GEMINI_API_KEY"));

    let (status, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health, json!({"status": "ok", "chat_enabled": false}));
}

#[tokio::test]
async fn test_chat_runs_tool_and_records_session() {
    let call = Content {
        role: "model".to_string(),
        parts: vec![Part {
            function_call: Some(FunctionCall {
                name: "search_trains".to_string(),
                args: json!({"origin": "Jakarta", "destination": "Malang", "date": "2024-08-15"}),
            }),
            ..Default::default()
        }],
    };
    let app = router(Some(vec![call, Content::model_text("Ada 2 kereta ke Malang.")]), false);

    let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({
        "message": "kereta ke Malang besok?",
        "conversation_history": [{"role": "assistant", "content": "Halo!"}],
        "session_id": "web-42"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"content": "Ada 2 kereta ke Malang."}));

    let (status, session) = send(&app, Method::GET, "/api/chat/sessions/web-42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["status"], "searching");
    assert_eq!(session["last_search_results"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::GET, "/api/chat/sessions/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_model_failure_is_bad_gateway() {
    let app = router(Some(vec![]), false);
    let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({
        "message": "halo", "session_id": "s2"
    }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_submit_order_is_accepted_and_ignored() {
    let app = router(None, false);
    let (status, body) = send(&app, Method::POST, "/api/submit-order", Some(json!({"anything": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, orders) = send(&app, Method::GET, "/api/my-orders", None).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_trains_catalog() {
    let app = router(None, false);
    let (status, body) = send(&app, Method::GET, "/api/trains", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = router(None, false);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/search-routes")
        .header(header::ORIGIN, "http://localhost:8080")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "http://localhost:8080");
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
}
