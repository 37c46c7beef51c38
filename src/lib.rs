//! Checkin: periodic mental health check-ins.
//!
//! A background scheduler generates a personalized wellness tip every few
//! days, keeps a short read/unread history of them and delivers each new
//! one over two independent channels:
//!
//! - **Notification**: an in-process event feed plus a permission-gated
//!   system notification
//! - **Email**: a best-effort send to the stored contact through EmailJS
//!
//! State is persisted as JSON through a [`store::KeyValueStore`], so the
//! schedule survives restarts.

pub mod catalog;
pub mod checkin_dirs;
pub mod clock;
pub mod config;
pub mod contact;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logging;
pub mod scheduler;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::CheckinConfig;
pub use error::{CheckinError, Result};
pub use scheduler::{AdviceScheduler, ScheduledAdvice, SchedulerState};
