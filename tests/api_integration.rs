//! HTTP surface driven through the router without binding a socket.

#![cfg(feature = "api")]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use inverter_sizer::api::{AppState, router};
use inverter_sizer::catalog::Catalog;
use inverter_sizer::config::NotifyConfig;
use inverter_sizer::engine::SizingPolicy;
use inverter_sizer::notify::{Mailer, NotifyError, OutboundEmail, ResendMailer};
use inverter_sizer::rules::RuleSet;

/// Mailer double returning a canned provider outcome.
struct StubMailer {
    outcome: Result<Value, String>,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl StubMailer {
    fn ok() -> Self {
        Self {
            outcome: Ok(json!({"id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"})),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Mailer for StubMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<Value, NotifyError> {
        self.sent.lock().unwrap().push(email.clone());
        self.outcome.clone().map_err(NotifyError::Provider)
    }
}

fn state_with(mailer: Arc<dyn Mailer>) -> Arc<AppState> {
    Arc::new(AppState {
        catalog: Catalog::builtin().clone(),
        rules: RuleSet::builtin().clone(),
        policy: SizingPolicy::default(),
        notify: NotifyConfig::default(),
        mailer,
    })
}

fn notification_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/send-contact-notification")
        .header("content-type", "application/json")
        .header("origin", "https://inverter.example")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(resp: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

const CURRENT_SHAPE: &str = r#"{
    "name": "Ada Obi",
    "email": "ada@example.com",
    "phone": "+2348000000000",
    "location": null,
    "message": "Please call me back",
    "contactMethod": "phone",
    "inverterSizing": {
        "appliances": [
            {"name": "Refrigerator", "wattage": 500, "quantity": 1},
            {"name": "LED Bulb (9W)", "wattage": 9, "quantity": 6}
        ],
        "calculations": {"totalLoad": 554, "requiredKva": 2.0625, "recommendedInverter": 2.5}
    }
}"#;

#[tokio::test]
async fn notification_success_returns_provider_body() {
    let mailer = Arc::new(StubMailer::ok());
    let app = router(state_with(mailer.clone()));

    let resp = app.oneshot(notification_request(CURRENT_SHAPE)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let json = read_json(resp).await;
    assert_eq!(json["id"], "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.subject, "New Contact: Ada Obi - InverterSize");
    assert_eq!(email.to, ["notifications@example.com"]);
    assert!(email.html.contains("<p><strong>Location:</strong> Not provided</p>"));
    assert!(email.html.contains("<p><strong>Total Load:</strong> 554W</p>"));
    assert!(email.html.contains("<p><strong>Required:</strong> 2.0625 kVA</p>"));
    assert!(email.html.contains("Refrigerator (500W x 1)<br>LED Bulb (9W) (9W x 6)"));
}

#[tokio::test]
async fn provider_rejection_returns_500_with_message() {
    let app = router(state_with(Arc::new(StubMailer::rejecting(
        "The `to` field must be a valid email",
    ))));

    let resp = app.oneshot(notification_request(CURRENT_SHAPE)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
    assert_eq!(
        read_json(resp).await,
        json!({"error": "The `to` field must be a valid email"})
    );
}

#[tokio::test]
async fn missing_api_key_returns_500() {
    let mailer = ResendMailer::new(&NotifyConfig::default(), None).unwrap();
    let app = router(state_with(Arc::new(mailer)));

    let resp = app.oneshot(notification_request(CURRENT_SHAPE)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(resp).await,
        json!({"error": "RESEND_API_KEY is not configured"})
    );
}

#[tokio::test]
async fn malformed_payload_returns_500() {
    let mailer = Arc::new(StubMailer::ok());
    let app = router(state_with(mailer.clone()));

    let resp = app
        .oneshot(notification_request(r#"{"name": "Ada"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = read_json(resp).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body")
    );
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn preflight_is_permissive() {
    let app = router(state_with(Arc::new(StubMailer::ok())));
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/send-contact-notification")
        .header("origin", "https://inverter.example")
        .header("access-control-request-method", "POST")
        .header(
            "access-control-request-headers",
            "authorization, x-client-info, apikey, content-type",
        )
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let allowed = headers
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_ascii_lowercase();
    for header in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(header), "missing {header} in {allowed}");
    }
}

#[tokio::test]
async fn evaluate_reports_warnings_and_blocked_rows() {
    let app = router(state_with(Arc::new(StubMailer::ok())));
    let req = Request::builder()
        .method("POST")
        .uri("/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{
                "quantities": {"electric_kettle": 1},
                "custom": [{"name": "Borehole pump", "wattage": 750, "category": "has_motor"}]
            }"#,
        ))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;

    assert_eq!(
        json["warnings"],
        json!(["Electric Kettle should not run with other heavy-duty appliances."])
    );
    let fridge = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["id"] == "refrigerator")
        .unwrap();
    assert_eq!(fridge["decision"]["allowed"], false);
    assert_eq!(fridge["decision"]["reason"], "Solo appliance selected");
    // 1500 W kettle + 750 W pump; surge 1500 + 2250
    assert_eq!(json["totals"]["total_running_watts"], 2250.0);
    assert_eq!(json["totals"]["total_surge_watts"], 3750.0);
}

#[tokio::test]
async fn evaluate_rejects_unknown_appliance() {
    let app = router(state_with(Arc::new(StubMailer::ok())));
    let req = Request::builder()
        .method("POST")
        .uri("/evaluate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"quantities": {"hovercraft": 1}}"#))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = read_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("hovercraft"));
}
