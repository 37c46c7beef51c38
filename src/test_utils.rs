//! Shared test doubles used across the scheduler and dispatch test modules.

use crate::catalog::{MentalHealthTip, Severity, TipCategory};
use crate::dispatch::{EmailTransport, NotificationPermission, SystemNotification, SystemNotifier};
use crate::error::{CheckinError, Result};
use crate::scheduler::ScheduledAdvice;
use crate::store::{KeyValueStore, MemoryStore};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Advice record with every optional field filled.
pub fn sample_advice(id: &str, timestamp: u64) -> ScheduledAdvice {
    ScheduledAdvice {
        id: id.to_owned(),
        timestamp,
        tip: MentalHealthTip {
            id: "stress-001".to_owned(),
            category: TipCategory::Stress,
            title: "Deep Breathing for Stress Relief".to_owned(),
            advice: "Try the 4-7-8 breathing technique.".to_owned(),
            actionable: vec![
                "Inhale for 4 counts".to_owned(),
                "Exhale for 8 counts".to_owned(),
            ],
            severity: Severity::Low,
        },
        personal_message: "Here's something that might help:".to_owned(),
        check_in_prompt: Some("How are you feeling emotionally right now?".to_owned()),
        affirmation: Some("You are stronger than you think.".to_owned()),
        is_read: false,
    }
}

/// Notifier with a fixed permission that records what it shows.
pub struct RecordingNotifier {
    permission: Mutex<NotificationPermission>,
    grant_on_request: bool,
    shown: Mutex<Vec<SystemNotification>>,
}

impl RecordingNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
            grant_on_request: false,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn granting_on_request(mut self) -> Self {
        self.grant_on_request = true;
        self
    }

    pub fn shown(&self) -> Vec<SystemNotification> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SystemNotifier for RecordingNotifier {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn request_permission(&self) -> NotificationPermission {
        let mut permission = self.permission.lock().unwrap_or_else(|e| e.into_inner());
        if self.grant_on_request {
            *permission = NotificationPermission::Granted;
        }
        *permission
    }

    fn show(&self, notification: &SystemNotification) -> Result<()> {
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to_email: String,
    pub to_name: String,
    pub body: String,
}

/// Transport that records every email instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Wait until at least `count` emails were recorded.
    pub async fn wait_for(&self, count: usize) -> bool {
        let poll = async {
            while self.sent().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), poll).await.is_ok()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    fn id(&self) -> &'static str {
        "recording"
    }

    async fn send_advice_email(&self, to_email: &str, to_name: &str, body: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentEmail {
                to_email: to_email.to_owned(),
                to_name: to_name.to_owned(),
                body: body.to_owned(),
            });
        Ok(())
    }
}

/// Transport whose provider always rejects the request.
pub struct FailingTransport;

#[async_trait]
impl EmailTransport for FailingTransport {
    fn id(&self) -> &'static str {
        "failing"
    }

    async fn send_advice_email(&self, _to: &str, _name: &str, _body: &str) -> Result<()> {
        Err(CheckinError::Email("provider rejected the request".to_owned()))
    }
}

/// Memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(CheckinError::Store("disk full".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.inner.remove(key)
    }
}
