//! Shared helpers for integration tests.

use async_trait::async_trait;
use checkin::clock::ManualClock;
use checkin::dispatch::{DisabledNotifier, EmailTransport};
use checkin::store::FileStore;
use checkin::{AdviceScheduler, CheckinConfig};
use std::sync::{Arc, Mutex};

/// 2023-11-14T22:13:20Z
pub(crate) const START: u64 = 1_700_000_000_000;

/// Email transport that keeps `(to_email, to_name, body)` triples.
#[derive(Default)]
pub(crate) struct CapturingTransport {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl EmailTransport for CapturingTransport {
    fn id(&self) -> &'static str {
        "capturing"
    }

    async fn send_advice_email(
        &self,
        to_email: &str,
        to_name: &str,
        body: &str,
    ) -> checkin::Result<()> {
        self.sent.lock().unwrap().push((
            to_email.to_owned(),
            to_name.to_owned(),
            body.to_owned(),
        ));
        Ok(())
    }
}

/// Scheduler over a file store in a fresh temp dir, driven by a manual clock.
/// Returns `(scheduler, clock, transport, tempdir)`.
pub(crate) fn file_scheduler() -> (
    AdviceScheduler,
    Arc<ManualClock>,
    Arc<CapturingTransport>,
    tempfile::TempDir,
) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let clock = Arc::new(ManualClock::new(START));
    let transport = Arc::new(CapturingTransport::default());
    let scheduler = reopen(dir.path(), &clock, transport.clone());
    (scheduler, clock, transport, dir)
}

/// Build another scheduler over the same store directory.
pub(crate) fn reopen(
    dir: &std::path::Path,
    clock: &Arc<ManualClock>,
    transport: Arc<CapturingTransport>,
) -> AdviceScheduler {
    AdviceScheduler::builder(CheckinConfig::default(), Arc::new(FileStore::new(dir)))
        .with_clock(clock.clone())
        .with_notifier(Arc::new(DisabledNotifier))
        .with_email_transport(transport)
        .with_rng_seed(7)
        .build()
        .expect("build scheduler")
}
