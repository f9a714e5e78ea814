use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info};
use tokio::select;
use tokio::sync::{Notify, RwLock};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::channel::DeliveryChannel;
use super::provider::MetricsProvider;
use crate::display::DisplayState;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Receives the display state after every poll.
pub trait SnapshotSink: Send + Sync + 'static {
    fn publish(&self, state: &DisplayState);
}

impl<F> SnapshotSink for F
where
    F: Fn(&DisplayState) + Send + Sync + 'static,
{
    fn publish(&self, state: &DisplayState) {
        self(state)
    }
}

/// Requests a snapshot immediately, then once per period, until dropped.
pub struct SnapshotPollerHandle {
    state: Arc<RwLock<DisplayState>>,
    ready: Arc<AtomicBool>,
    notify_ready: Arc<Notify>,
    cancel: CancellationToken,
    _runtime: Option<Arc<tokio::runtime::Runtime>>,
}

impl SnapshotPollerHandle {
    pub fn spawn<P, S>(
        channel: Arc<DeliveryChannel<P>>,
        period: Duration,
        sink: S,
    ) -> std::io::Result<Self>
    where
        P: MetricsProvider,
        S: SnapshotSink,
    {
        let state = Arc::new(RwLock::new(DisplayState::default()));
        let ready = Arc::new(AtomicBool::new(false));
        let notify_ready = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let inner = PollerInner {
            channel,
            period,
            sink,
            state: Arc::clone(&state),
            ready: Arc::clone(&ready),
            notify_ready: Arc::clone(&notify_ready),
            cancel: cancel.clone(),
        };

        let fut = inner.run();

        let runtime_guard = match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(fut);
                None
            }
            Err(_) => {
                let runtime = Arc::new(
                    tokio::runtime::Builder::new_multi_thread()
                        .worker_threads(1)
                        .thread_name("host-monitor-poller")
                        .enable_all()
                        .build()?,
                );
                runtime.spawn(fut);
                Some(runtime)
            }
        };

        Ok(SnapshotPollerHandle {
            state,
            ready,
            notify_ready,
            cancel,
            _runtime: runtime_guard,
        })
    }

    pub async fn current(&self) -> DisplayState {
        self.state.read().await.clone()
    }

    /// Resolves once the first poll has been applied, whatever its outcome.
    pub async fn wait_until_ready(&self) {
        let notified = self.notify_ready.notified();
        if self.ready.load(Ordering::SeqCst) {
            return;
        }
        notified.await;
    }
}

pub type SnapshotPoller = SnapshotPollerHandle;

impl Drop for SnapshotPollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct PollerInner<P, S> {
    channel: Arc<DeliveryChannel<P>>,
    period: Duration,
    sink: S,
    state: Arc<RwLock<DisplayState>>,
    ready: Arc<AtomicBool>,
    notify_ready: Arc<Notify>,
    cancel: CancellationToken,
}

impl<P: MetricsProvider, S: SnapshotSink> PollerInner<P, S> {
    async fn run(self) {
        info!("snapshot poller started (every {}ms)", self.period.as_millis());

        // The first tick completes immediately.
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            select! {
                _ = self.cancel.cancelled() => {
                    break;
                }
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
            }
        }

        info!("snapshot poller stopped");
    }

    async fn poll_once(&self) {
        let outcome = select! {
            _ = self.cancel.cancelled() => return,
            outcome = self.channel.request_snapshot() => outcome,
        };
        if outcome.is_none() {
            debug!("no snapshot this cycle, keeping previous display state");
        }

        let published = {
            let mut guard = self.state.write().await;
            guard.apply(outcome, Utc::now());
            guard.clone()
        };
        self.sink.publish(&published);

        if !self.ready.swap(true, Ordering::SeqCst) {
            self.notify_ready.notify_waiters();
        }
    }
}
