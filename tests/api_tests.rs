//! API Integration Tests for the Chatty Dealer backend
//!
//! Drives the router end to end: open a table, play rounds, restart.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tower::{Service, ServiceExt};

use chatty_dealer::api;
use chatty_dealer::infrastructure::app_state::AppState;
use chatty_dealer::infrastructure::config::AppConfig;
use chatty_dealer::infrastructure::services::{LlmService, MockLlmService};

/// Helper to create a test application around a given LLM mock
fn create_test_app(llm: Option<MockLlmService>) -> Router {
    let config = AppConfig {
        rng_seed: Some(2024),
        ..AppConfig::default()
    };
    let llm = llm.map(|service| Arc::new(service) as Arc<dyn LlmService>);
    let state = Arc::new(AppState::with_llm_service(config, llm));

    Router::new()
        .nest("/api", api::routes::create_api_router(state.clone()))
        .with_state(state)
}

async fn send(app: &mut Router, method: &str, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = ServiceExt::<Request<Body>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn open_table(app: &mut Router) -> String {
    let (status, body) = send(app, "POST", "/api/sessions").await;
    assert_eq!(status, StatusCode::CREATED);
    body["sessionId"].as_str().unwrap().to_string()
}

fn cards(view: &Value) -> Vec<String> {
    view["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Table lifecycle
// ============================================================================

#[tokio::test]
async fn test_first_view_deals_two_and_two() {
    let mut app = create_test_app(None);
    let id = open_table(&mut app).await;

    let (status, body) = send(&mut app, "GET", &format!("/api/sessions/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "inProgress");
    assert_eq!(body["applied"], true);
    assert_eq!(body["gameOver"], false);
    assert_eq!(body["result"], "");

    let player = cards(&body["player"]);
    let dealer = cards(&body["dealer"]);
    assert_eq!(player.len(), 2);
    assert_eq!(dealer.len(), 1);
    assert_eq!(body["dealer"]["hiddenCards"], 1);
    assert!(body["dealer"].get("total").is_none());
    assert!(!player.contains(&dealer[0]));

    // A second look shows the same round
    let (_, again) = send(&mut app, "GET", &format!("/api/sessions/{}", id)).await;
    assert_eq!(again["applied"], false);
    assert_eq!(cards(&again["player"]), player);
}

#[tokio::test]
async fn test_stand_reveals_dealer_and_settles() {
    let mut app = create_test_app(Some(MockLlmService::new("Playing it safe, I see.")));
    let id = open_table(&mut app).await;
    send(&mut app, "GET", &format!("/api/sessions/{}", id)).await;

    let (status, body) = send(&mut app, "POST", &format!("/api/sessions/{}/stand", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameOver"], true);
    assert_eq!(body["phase"], "roundOver");
    assert_eq!(body["dealer"]["hiddenCards"], 0);
    assert!(cards(&body["dealer"]).len() >= 2);

    let player_total = body["player"]["total"].as_u64().unwrap();
    let dealer_total = body["dealer"]["total"].as_u64().unwrap();
    assert!(dealer_total >= 17);

    let expected = if dealer_total > 21 || player_total > dealer_total {
        "🎉 You win!"
    } else if dealer_total == player_total {
        "🤝 It's a tie!"
    } else {
        "🏴 Dealer wins!"
    };
    assert_eq!(body["result"], expected);
    assert_eq!(body["commentary"], "Playing it safe, I see.");

    // Further actions are ignored until restart
    let (_, hit) = send(&mut app, "POST", &format!("/api/sessions/{}/hit", id)).await;
    assert_eq!(hit["applied"], false);
    assert_eq!(hit["player"]["cards"], body["player"]["cards"]);
    assert_eq!(hit["result"], body["result"]);
}

#[tokio::test]
async fn test_hits_never_repeat_cards_and_bust_without_llm() {
    let mut app = create_test_app(None);
    let id = open_table(&mut app).await;
    let (_, first) = send(&mut app, "GET", &format!("/api/sessions/{}", id)).await;
    let dealer_up = cards(&first["dealer"]);

    let mut body = first;
    for _ in 0..21 {
        let (status, next) = send(&mut app, "POST", &format!("/api/sessions/{}/hit", id)).await;
        assert_eq!(status, StatusCode::OK);
        body = next;

        let player = cards(&body["player"]);
        let unique: HashSet<_> = player.iter().collect();
        assert_eq!(unique.len(), player.len());
        assert!(!player.contains(&dealer_up[0]));

        if body["gameOver"] == true {
            break;
        }
    }

    assert_eq!(body["gameOver"], true);
    assert!(body["player"]["total"].as_u64().unwrap() > 21);
    assert_eq!(body["result"], "💥 You busted! Dealer wins.");
    assert_eq!(body["commentary"], "[Dealer is speechless: Service unavailable]");
}

#[tokio::test]
async fn test_restart_clears_then_next_view_deals() {
    let mut app = create_test_app(Some(MockLlmService::failing()));
    let id = open_table(&mut app).await;
    send(&mut app, "GET", &format!("/api/sessions/{}", id)).await;
    send(&mut app, "POST", &format!("/api/sessions/{}/stand", id)).await;

    let (status, body) = send(&mut app, "POST", &format!("/api/sessions/{}/restart", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "notStarted");
    assert_eq!(body["gameOver"], false);
    assert_eq!(body["result"], "");
    assert_eq!(body["commentary"], "");
    assert!(cards(&body["player"]).is_empty());
    assert!(cards(&body["dealer"]).is_empty());

    let (_, fresh) = send(&mut app, "GET", &format!("/api/sessions/{}", id)).await;
    assert_eq!(fresh["phase"], "inProgress");
    assert_eq!(cards(&fresh["player"]).len(), 2);
    assert_eq!(fresh["dealer"]["hiddenCards"], 1);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let mut app = create_test_app(None);
    let a = open_table(&mut app).await;
    let b = open_table(&mut app).await;
    assert_ne!(a, b);

    send(&mut app, "GET", &format!("/api/sessions/{}", a)).await;
    send(&mut app, "POST", &format!("/api/sessions/{}/stand", a)).await;

    let (_, other) = send(&mut app, "GET", &format!("/api/sessions/{}", b)).await;
    assert_eq!(other["phase"], "inProgress");
    assert_eq!(other["gameOver"], false);
}

// ============================================================================
// Errors & health
// ============================================================================

#[tokio::test]
async fn test_unknown_session() {
    let mut app = create_test_app(None);

    for (method, path) in [
        ("GET", "/api/sessions/nope"),
        ("POST", "/api/sessions/nope/hit"),
        ("POST", "/api/sessions/nope/stand"),
        ("POST", "/api/sessions/nope/restart"),
        ("DELETE", "/api/sessions/nope"),
    ] {
        let (status, body) = send(&mut app, method, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, path);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");
    }
}

#[tokio::test]
async fn test_close_table() {
    let mut app = create_test_app(None);
    let id = open_table(&mut app).await;

    let (status, _) = send(&mut app, "DELETE", &format!("/api/sessions/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&mut app, "GET", &format!("/api/sessions/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let mut app = create_test_app(Some(MockLlmService::new("ok")));
    open_table(&mut app).await;

    let (status, body) = send(&mut app, "GET", "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["open_tables"], 1);
    assert_eq!(body["commentary_enabled"], true);
}
