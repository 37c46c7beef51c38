//! EmailJS transport contract tests.
//!
//! Verify the exact request body sent to the EmailJS REST API and how
//! provider errors surface.

use checkin::config::EmailConfig;
use checkin::dispatch::{EmailJsTransport, EmailTransport, format_advice_email};
use checkin::error::CheckinError;
use checkin::store::MemoryStore;
use checkin::{AdviceScheduler, CheckinConfig};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEND_PATH: &str = "/api/v1.0/email/send";

fn email_config(server: &MockServer) -> EmailConfig {
    EmailConfig {
        enabled: true,
        endpoint: format!("{}{SEND_PATH}", server.uri()),
        service_id: "service_test".to_owned(),
        template_id: "template_test".to_owned(),
        public_key: "public_test".to_owned(),
        timeout_secs: 5,
        ..EmailConfig::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn request_includes_ids_and_template_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({
            "service_id": "service_test",
            "template_id": "template_test",
            "user_id": "public_test",
            "template_params": {
                "user_name": "Sam",
                "user_email": "sam@example.com",
                "user_advice": "body text"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = EmailJsTransport::new(&email_config(&server)).unwrap();
    transport
        .send_advice_email("sam@example.com", "Sam", "body text")
        .await
        .unwrap();
}

#[tokio::test]
async fn access_token_is_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({ "accessToken": "private_test" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let config = EmailConfig {
        access_token: Some("private_test".to_owned()),
        ..email_config(&server)
    };
    let transport = EmailJsTransport::new(&config).unwrap();
    transport
        .send_advice_email("sam@example.com", "Sam", "body")
        .await
        .unwrap();
}

#[tokio::test]
async fn access_token_is_omitted_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let transport = EmailJsTransport::new(&email_config(&server)).unwrap();
    transport
        .send_advice_email("sam@example.com", "Sam", "body")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("accessToken").is_none());
}

// ────────────────────────────────────────────────────────────────────────────
// Error handling
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn rejected_request_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("The user ID is invalid"))
        .mount(&server)
        .await;

    let transport = EmailJsTransport::new(&email_config(&server)).unwrap();
    let err = transport
        .send_advice_email("sam@example.com", "Sam", "body")
        .await
        .unwrap_err();

    assert!(matches!(err, CheckinError::Email(_)));
    let message = err.to_string();
    assert!(message.contains("400"), "{message}");
    assert!(message.contains("The user ID is invalid"), "{message}");
}

// ────────────────────────────────────────────────────────────────────────────
// Scheduler end to end
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scheduled_advice_is_emailed_through_emailjs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({
            "template_params": { "user_name": "Valued User", "user_email": "sam@example.com" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let config = CheckinConfig {
        email: email_config(&server),
        ..CheckinConfig::default()
    };
    let scheduler = AdviceScheduler::builder(config, Arc::new(MemoryStore::new()))
        .build()
        .unwrap();
    scheduler.set_user_info("sam@example.com", "");

    let advice = scheduler.send_now();
    scheduler.wait_for_pending_emails().await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["template_params"]["user_advice"],
        format_advice_email(&advice)
    );
}

#[tokio::test]
async fn provider_failure_leaves_history_intact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let config = CheckinConfig {
        email: email_config(&server),
        ..CheckinConfig::default()
    };
    let scheduler = AdviceScheduler::builder(config, Arc::new(MemoryStore::new()))
        .build()
        .unwrap();
    scheduler.set_user_info("sam@example.com", "Sam");

    let advice = scheduler.send_now();
    scheduler.wait_for_pending_emails().await;

    let history = scheduler.advice_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, advice.id);
}
