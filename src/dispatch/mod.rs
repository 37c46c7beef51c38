//! Delivery channels for generated advice.
//!
//! Each new [`ScheduledAdvice`](crate::scheduler::ScheduledAdvice) fans out to
//! two independent channels: the in-process notification channel (event
//! broadcast plus a permission-gated system notification) and the email
//! channel. Neither channel can fail the generation that produced the advice.

pub mod email;
pub mod notification;

pub use email::{
    EmailDispatcher, EmailJsTransport, EmailTransport, NoopEmailTransport, format_advice_email,
};
pub use notification::{
    DisabledNotifier, LogNotifier, NotificationDispatcher, NotificationPermission,
    SystemNotification, SystemNotifier,
};
