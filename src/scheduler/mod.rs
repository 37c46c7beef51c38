//! Periodic advice scheduler.
//!
//! Generates a mental health check-in once per advice interval, keeps a
//! short persisted history of them and hands each new one to the delivery
//! channels in [`crate::dispatch`].

pub mod runner;
pub mod state;

pub use runner::{AdviceScheduler, AdviceSchedulerBuilder};
pub use state::{STATE_KEY, ScheduledAdvice, SchedulerState};
