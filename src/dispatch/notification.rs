//! In-process notification channel.
//!
//! Every generated advice is broadcast to subscribers. A system notification
//! is additionally shown when the platform notifier reports granted
//! permission; a denied or unsupported notifier is skipped silently.

use crate::config::NotificationConfig;
use crate::error::{CheckinError, Result};
use crate::scheduler::ScheduledAdvice;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Buffered events per subscriber before lagging receivers drop the oldest.
const EVENT_CAPACITY: usize = 16;

/// Platform permission to show system notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// Not asked yet.
    Default,
    /// The platform has no notification facility.
    Unsupported,
}

/// A notification as handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemNotification {
    pub title: String,
    pub body: String,
    /// Notifications sharing a tag replace each other.
    pub tag: String,
    pub icon: String,
}

/// Platform notification facility.
pub trait SystemNotifier: Send + Sync {
    fn permission(&self) -> NotificationPermission;

    /// Ask the user for permission. Platforms without a prompt just report
    /// the current permission.
    fn request_permission(&self) -> NotificationPermission {
        self.permission()
    }

    fn show(&self, notification: &SystemNotification) -> Result<()>;
}

/// Emits notifications through `tracing`. Always granted.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl SystemNotifier for LogNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    fn show(&self, notification: &SystemNotification) -> Result<()> {
        info!(
            target: "checkin::notification",
            tag = %notification.tag,
            "{}: {}",
            notification.title,
            notification.body.replace("\n\n", " | ")
        );
        Ok(())
    }
}

/// Notifier for hosts without a notification facility.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl SystemNotifier for DisabledNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Unsupported
    }

    fn show(&self, _notification: &SystemNotification) -> Result<()> {
        Err(CheckinError::Notification(
            "system notifications are not supported".to_owned(),
        ))
    }
}

/// Fans advice out to in-process subscribers and the system notifier.
pub struct NotificationDispatcher {
    notifier: Arc<dyn SystemNotifier>,
    events: broadcast::Sender<ScheduledAdvice>,
    config: NotificationConfig,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn SystemNotifier>, config: NotificationConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            notifier,
            events,
            config,
        }
    }

    /// Receive every advice dispatched after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ScheduledAdvice> {
        self.events.subscribe()
    }

    pub fn build_notification(&self, advice: &ScheduledAdvice) -> SystemNotification {
        SystemNotification {
            title: self.config.title.clone(),
            body: format!("{}\n\n{}", advice.personal_message, advice.tip.title),
            tag: self.config.tag.clone(),
            icon: self.config.icon.clone(),
        }
    }

    /// Show the system notification when permitted, then broadcast the
    /// advice. Never fails.
    pub fn dispatch(&self, advice: &ScheduledAdvice) {
        if self.config.enabled {
            match self.notifier.permission() {
                NotificationPermission::Granted => {
                    if let Err(e) = self.notifier.show(&self.build_notification(advice)) {
                        warn!("failed to show notification for {}: {e}", advice.id);
                    }
                }
                other => debug!("skipping system notification, permission {other:?}"),
            }
        }

        // Err only means nobody is subscribed.
        let receivers = self.events.send(advice.clone()).unwrap_or(0);
        debug!("advice {} broadcast to {receivers} subscriber(s)", advice.id);
    }

    /// Returns `true` when notifications end up granted.
    pub fn request_permission(&self) -> bool {
        match self.notifier.permission() {
            NotificationPermission::Granted => true,
            NotificationPermission::Unsupported => {
                debug!("system notifications are not supported on this host");
                false
            }
            NotificationPermission::Denied | NotificationPermission::Default => {
                self.notifier.request_permission() == NotificationPermission::Granted
            }
        }
    }
}
