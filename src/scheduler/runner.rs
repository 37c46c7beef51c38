//! Advice scheduler background loop.
//!
//! An [`AdviceScheduler`] owns the persisted [`SchedulerState`], performs
//! due-checks on a fixed cadence and generates a new [`ScheduledAdvice`]
//! once the advice interval has elapsed. Generated advice is persisted
//! before it is handed to the notification and email channels.

use crate::catalog::{self, Mood};
use crate::clock::{Clock, SystemClock};
use crate::config::{CheckinConfig, SchedulerConfig};
use crate::contact::UserContact;
use crate::dispatch::email::transport_from_config;
use crate::dispatch::{
    EmailDispatcher, EmailTransport, LogNotifier, NotificationDispatcher, SystemNotifier,
};
use crate::error::Result;
use crate::scheduler::state::{ScheduledAdvice, SchedulerState};
use crate::store::KeyValueStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Periodic mental health check-in scheduler.
///
/// Cheap to clone; all clones share one state. Construct with
/// [`AdviceScheduler::builder`], then call [`start`](Self::start) from
/// within a tokio runtime to begin periodic due-checks.
#[derive(Clone)]
pub struct AdviceScheduler {
    inner: Arc<Inner>,
}

struct Inner {
    config: SchedulerConfig,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    /// Mirror of the persisted state.
    state: Mutex<SchedulerState>,
    /// Set while the in-memory state holds changes the store has not accepted.
    unsaved: AtomicBool,
    rng: Mutex<StdRng>,
    id_seq: AtomicU64,
    notifications: NotificationDispatcher,
    email: EmailDispatcher,
    timer: Mutex<Option<TimerHandle>>,
    /// Email sends spawned by dispatch that may still be running.
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

struct TimerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(timer) = timer.take() {
            timer.cancel.cancel();
        }
    }
}

/// Builder for [`AdviceScheduler`].
pub struct AdviceSchedulerBuilder {
    config: CheckinConfig,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    notifier: Option<Arc<dyn SystemNotifier>>,
    transport: Option<Arc<dyn EmailTransport>>,
    rng_seed: Option<u64>,
}

impl AdviceSchedulerBuilder {
    /// Override the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the system notifier. Defaults to [`LogNotifier`].
    pub fn with_notifier(mut self, notifier: Arc<dyn SystemNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Override the email transport. Defaults to one derived from the email config.
    pub fn with_email_transport(mut self, transport: Arc<dyn EmailTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Seed the selection RNG for reproducible advice.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Validate the config and load persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the email transport
    /// cannot be built.
    pub fn build(self) -> Result<AdviceScheduler> {
        self.config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => transport_from_config(&self.config.email)?,
        };
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(LogNotifier) as Arc<dyn SystemNotifier>);
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = SchedulerState::load(self.store.as_ref(), self.config.scheduler.history_limit);

        let inner = Inner {
            notifications: NotificationDispatcher::new(notifier, self.config.notification),
            email: EmailDispatcher::new(
                transport,
                Arc::clone(&self.store),
                self.config.email.fallback_name,
            ),
            config: self.config.scheduler,
            store: self.store,
            clock: self.clock,
            state: Mutex::new(state),
            unsaved: AtomicBool::new(false),
            rng: Mutex::new(rng),
            id_seq: AtomicU64::new(0),
            timer: Mutex::new(None),
            in_flight: Mutex::new(Vec::new()),
        };
        Ok(AdviceScheduler {
            inner: Arc::new(inner),
        })
    }
}

impl AdviceScheduler {
    /// Start building a scheduler over `store` with the system clock.
    pub fn builder(config: CheckinConfig, store: Arc<dyn KeyValueStore>) -> AdviceSchedulerBuilder {
        AdviceSchedulerBuilder {
            config,
            store,
            clock: Arc::new(SystemClock),
            notifier: None,
            transport: None,
            rng_seed: None,
        }
    }

    /// Run one due-check now, then keep checking on the configured cadence.
    ///
    /// The first timer tick happens one cadence after start. Calling `start`
    /// on a running scheduler does nothing.
    pub fn start(&self) {
        if self.is_running() {
            warn!("advice scheduler already running");
            return;
        }

        self.check_and_send();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            error!("no async runtime, advice timer not started");
            return;
        };
        let mut timer = self.lock_timer();
        if timer.is_some() {
            return;
        }
        let cancel = CancellationToken::new();
        let cadence = self.inner.config.check_cadence();
        let task = runtime.spawn(run_timer(
            Arc::downgrade(&self.inner),
            cancel.clone(),
            cadence,
        ));
        *timer = Some(TimerHandle { cancel, task });
        info!("advice scheduler started, checking every {}s", cadence.as_secs());
    }

    /// Stop the timer. Persisted state is untouched and in-flight emails
    /// still complete.
    pub fn destroy(&self) {
        match self.lock_timer().take() {
            Some(timer) => {
                timer.cancel.cancel();
                info!("advice scheduler stopped");
            }
            None => debug!("advice scheduler not running"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock_timer()
            .as_ref()
            .is_some_and(|timer| !timer.task.is_finished())
    }

    /// Generate and dispatch advice if enabled and the interval has elapsed.
    ///
    /// Returns `true` when advice was generated.
    pub fn check_and_send(&self) -> bool {
        let now = self.inner.clock.now_millis();
        let interval = self.inner.config.advice_interval();
        let advice = {
            let mut state = self.current_state();
            if !state.is_enabled {
                debug!("advice scheduler disabled, skipping due-check");
                return false;
            }
            if !state.is_due(now, interval) {
                debug!(
                    "next advice due in {}s",
                    state.time_until_next(now, interval).as_secs()
                );
                return false;
            }
            self.generate(&mut state, now)
        };
        self.dispatch(&advice);
        true
    }

    /// Generate and dispatch advice immediately, regardless of timing or
    /// the enabled flag.
    pub fn send_now(&self) -> ScheduledAdvice {
        let now = self.inner.clock.now_millis();
        let advice = {
            let mut state = self.current_state();
            self.generate(&mut state, now)
        };
        self.dispatch(&advice);
        advice
    }

    /// Unread advice, newest first.
    pub fn unread_advice(&self) -> Vec<ScheduledAdvice> {
        self.current_state().unread()
    }

    /// Full advice history, newest first.
    pub fn advice_history(&self) -> Vec<ScheduledAdvice> {
        self.current_state().advice_history.clone()
    }

    /// Mark one advice read. Unknown ids are ignored.
    pub fn mark_as_read(&self, id: &str) {
        let mut state = self.current_state();
        if state.mark_as_read(id) {
            self.persist(&state);
        } else {
            debug!("advice {id} not found or already read");
        }
    }

    pub fn mark_all_as_read(&self) {
        let mut state = self.current_state();
        if state.mark_all_as_read() > 0 {
            self.persist(&state);
        }
    }

    /// Enable or disable periodic advice. Persisted immediately.
    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.current_state();
        state.is_enabled = enabled;
        self.persist(&state);
        info!("advice scheduler {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn is_enabled(&self) -> bool {
        self.current_state().is_enabled
    }

    /// Time until the next advice is due; zero when already due.
    pub fn time_until_next(&self) -> Duration {
        let now = self.inner.clock.now_millis();
        self.current_state()
            .time_until_next(now, self.inner.config.advice_interval())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SchedulerState {
        self.current_state().clone()
    }

    /// Store the email recipient used for future advice emails.
    pub fn set_user_info(&self, email: &str, name: &str) {
        match UserContact::new(email, name).save(self.inner.store.as_ref()) {
            Ok(()) => info!("advice contact updated"),
            Err(e) => error!("failed to save advice contact: {e}"),
        }
    }

    /// Drop all persisted state and start over as on first run.
    ///
    /// A running timer is restarted, which performs an immediate due-check.
    pub fn reset(&self) {
        let was_running = self.is_running();
        self.destroy();
        {
            let mut state = self.lock_state();
            *state = SchedulerState::default();
            match SchedulerState::clear(self.inner.store.as_ref()) {
                Ok(()) => self.inner.unsaved.store(false, Ordering::SeqCst),
                Err(e) => {
                    error!("failed to clear scheduler state: {e}");
                    self.inner.unsaved.store(true, Ordering::SeqCst);
                }
            }
        }
        info!("advice scheduler reset");
        if was_running {
            self.start();
        }
    }

    /// Receive every advice generated after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ScheduledAdvice> {
        self.inner.notifications.subscribe()
    }

    /// Ask the platform for notification permission.
    pub fn request_notification_permission(&self) -> bool {
        self.inner.notifications.request_permission()
    }

    /// Email a sample advice to the stored contact without touching state.
    ///
    /// Returns `false` when no email is on file or the transport fails.
    pub async fn send_test_email(&self) -> bool {
        let advice = {
            let now = self.inner.clock.now_millis();
            let mut rng = self.lock_rng();
            let personalized = catalog::personalized_advice(Mood::General, &mut *rng);
            ScheduledAdvice {
                id: format!("test-{now}"),
                timestamp: now,
                tip: personalized.tip,
                personal_message: personalized.personal_message,
                check_in_prompt: catalog::check_in_prompts()
                    .choose(&mut *rng)
                    .map(|p| (*p).to_owned()),
                affirmation: catalog::affirmations()
                    .choose(&mut *rng)
                    .map(|a| (*a).to_owned()),
                is_read: false,
            }
        };
        match self.inner.email.deliver(&advice).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!("test email failed: {e}");
                false
            }
        }
    }

    fn generate(&self, state: &mut SchedulerState, now: u64) -> ScheduledAdvice {
        let id = self.next_id(state, now);
        let (mood, advice) = {
            let mut rng = self.lock_rng();
            let mood = Mood::SCHEDULED
                .choose(&mut *rng)
                .copied()
                .unwrap_or(Mood::General);
            let personalized = catalog::personalized_advice(mood, &mut *rng);
            let advice = ScheduledAdvice {
                id,
                timestamp: now,
                tip: personalized.tip,
                personal_message: personalized.personal_message,
                check_in_prompt: catalog::check_in_prompts()
                    .choose(&mut *rng)
                    .map(|p| (*p).to_owned()),
                affirmation: catalog::affirmations()
                    .choose(&mut *rng)
                    .map(|a| (*a).to_owned()),
                is_read: false,
            };
            (mood, advice)
        };

        state.push_advice(advice.clone(), self.inner.config.history_limit);
        self.persist(state);
        info!(
            "generated advice {} ({mood:?}, {})",
            advice.id, advice.tip.category
        );
        advice
    }

    fn next_id(&self, state: &SchedulerState, now: u64) -> String {
        loop {
            let seq = self.inner.id_seq.fetch_add(1, Ordering::Relaxed);
            let id = format!("advice-{now}-{seq}");
            if !state.advice_history.iter().any(|a| a.id == id) {
                return id;
            }
        }
    }

    /// Wait for spawned advice emails to finish.
    ///
    /// Short-lived processes call this before exiting so queued sends are
    /// not dropped with the runtime.
    pub async fn wait_for_pending_emails(&self) {
        let pending: Vec<JoinHandle<()>> = std::mem::take(&mut *self.lock_in_flight());
        for handle in pending {
            if let Err(e) = handle.await {
                warn!("advice email task failed: {e}");
            }
        }
    }

    fn dispatch(&self, advice: &ScheduledAdvice) {
        self.inner.notifications.dispatch(advice);
        if let Some(handle) = self.inner.email.dispatch(advice.clone()) {
            let mut in_flight = self.lock_in_flight();
            in_flight.retain(|h| !h.is_finished());
            in_flight.push(handle);
            debug!("advice email for {} queued", advice.id);
        }
    }

    /// Lock the state, refreshing it from the store unless memory holds
    /// unsaved changes.
    fn current_state(&self) -> MutexGuard<'_, SchedulerState> {
        let mut state = self.lock_state();
        if !self.inner.unsaved.load(Ordering::SeqCst) {
            *state =
                SchedulerState::load(self.inner.store.as_ref(), self.inner.config.history_limit);
        }
        state
    }

    fn persist(&self, state: &SchedulerState) {
        match state.save(self.inner.store.as_ref()) {
            Ok(()) => self.inner.unsaved.store(false, Ordering::SeqCst),
            Err(e) => {
                error!("failed to persist scheduler state: {e}");
                self.inner.unsaved.store(true, Ordering::SeqCst);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SchedulerState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        self.inner.rng.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_timer(&self) -> MutexGuard<'_, Option<TimerHandle>> {
        self.inner.timer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

async fn run_timer(inner: Weak<Inner>, cancel: CancellationToken, cadence: Duration) {
    let mut ticker = tokio::time::interval_at(Instant::now() + cadence, cadence);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                AdviceScheduler { inner }.check_and_send();
            }
        }
    }
    debug!("advice timer exited");
}
