//! End-to-end scheduler behaviour over a file-backed store.

use crate::helpers::{CapturingTransport, START, file_scheduler, reopen};
use checkin::catalog::TipCategory;
use checkin::scheduler::STATE_KEY;
use checkin::store::{FileStore, KeyValueStore};
use std::sync::Arc;
use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[test]
fn state_persists_across_restarts() {
    let (scheduler, clock, transport, dir) = file_scheduler();
    let first = scheduler.send_now();
    clock.advance(Duration::from_secs(5));
    let second = scheduler.send_now();
    scheduler.mark_as_read(&first.id);
    drop(scheduler);

    let reopened = reopen(dir.path(), &clock, transport);
    let history = reopened.advice_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);
    assert!(history[1].is_read);
    assert_eq!(reopened.unread_advice().len(), 1);
}

#[test]
fn state_file_uses_camel_case_layout() {
    let (scheduler, _clock, _transport, dir) = file_scheduler();
    scheduler.send_now();

    let raw = std::fs::read_to_string(dir.path().join(format!("{STATE_KEY}.json"))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["lastSent"], START);
    assert_eq!(json["isEnabled"], true);
    let advice = &json["adviceHistory"][0];
    for key in ["id", "timestamp", "tip", "personalMessage", "isRead"] {
        assert!(advice.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn externally_written_state_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .set(
            STATE_KEY,
            r#"{
              "lastSent": 1699000000000,
              "adviceHistory": [
                {
                  "id": "advice-1699000000000",
                  "timestamp": 1699000000000,
                  "tip": {
                    "id": "self-care-001",
                    "category": "self-care",
                    "title": "Daily Self-Care Essentials",
                    "advice": "Small daily practices compound over time.",
                    "actionable": ["Drink a glass of water"],
                    "severity": "low"
                  },
                  "personalMessage": "Your energy is important.",
                  "isRead": false
                }
              ],
              "isEnabled": true
            }"#,
        )
        .unwrap();

    let clock = Arc::new(checkin::clock::ManualClock::new(START));
    let scheduler = reopen(dir.path(), &clock, Arc::new(CapturingTransport::default()));
    let history = scheduler.advice_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].tip.category, TipCategory::SelfCare);
    assert!(history[0].check_in_prompt.is_none());

    // Last sent well over three days before START.
    assert!(scheduler.check_and_send());
    assert_eq!(scheduler.advice_history().len(), 2);
}

#[test]
fn disabled_survives_restart_and_blocks_checks() {
    let (scheduler, clock, transport, dir) = file_scheduler();
    scheduler.set_enabled(false);
    drop(scheduler);

    clock.advance(DAY * 30);
    let reopened = reopen(dir.path(), &clock, transport);
    assert!(!reopened.is_enabled());
    assert!(!reopened.check_and_send());
    assert!(reopened.advice_history().is_empty());

    reopened.set_enabled(true);
    assert!(reopened.check_and_send());
}

#[tokio::test(start_paused = true)]
async fn running_scheduler_delivers_on_schedule() {
    let (scheduler, clock, transport, _dir) = file_scheduler();
    scheduler.set_user_info("sam@example.com", "Sam");
    let mut events = scheduler.subscribe();

    scheduler.start();
    let first = events.recv().await.unwrap();
    assert_eq!(first.timestamp, START);

    clock.advance(DAY * 2);
    tokio::time::sleep(Duration::from_secs(2 * 60 * 60)).await;
    assert_eq!(scheduler.advice_history().len(), 1);

    clock.advance(DAY);
    let second = tokio::time::timeout(Duration::from_secs(2 * 60 * 60), events.recv())
        .await
        .expect("advice within two ticks")
        .unwrap();
    assert_ne!(second.id, first.id);

    scheduler.destroy();
    scheduler.wait_for_pending_emails().await;
    let sent = transport.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|(email, name, _)| email == "sam@example.com" && name == "Sam"));
    assert!(sent[1].2.contains(&second.tip.title));
}

#[test]
fn reset_removes_state_file() {
    let (scheduler, _clock, _transport, dir) = file_scheduler();
    scheduler.send_now();
    let path = dir.path().join(format!("{STATE_KEY}.json"));
    assert!(path.exists());

    scheduler.reset();
    assert!(!path.exists());
    assert!(scheduler.advice_history().is_empty());
    assert!(scheduler.is_enabled());
}
