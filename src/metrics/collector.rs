use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::task::spawn_blocking;
use tokio::time::timeout;

use super::error::{CollectError, FailureReason, ProviderError, QueryFailure, QueryKind};
use super::provider::MetricsProvider;
use super::types::SystemData;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Produces one [`SystemData`] per call, or fails as a unit.
///
/// The five provider queries run concurrently on the blocking pool, each under
/// `query_timeout`. All of them are awaited before the outcome is decided, and a
/// single failed query discards the rest. No retries.
pub struct SnapshotCollector<P> {
    provider: Arc<P>,
    query_timeout: Duration,
}

impl<P: MetricsProvider> SnapshotCollector<P> {
    pub fn new(provider: P, query_timeout: Duration) -> Self {
        Self::with_shared(Arc::new(provider), query_timeout)
    }

    pub fn with_shared(provider: Arc<P>, query_timeout: Duration) -> Self {
        SnapshotCollector {
            provider,
            query_timeout,
        }
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    pub async fn collect(&self) -> Result<SystemData, CollectError> {
        let started = Instant::now();

        let (identity, cpu, memory, storage, network) = tokio::join!(
            self.run(QueryKind::Identity, |p: &P| p.identity()),
            self.run(QueryKind::Cpu, |p: &P| p.cpu()),
            self.run(QueryKind::Memory, |p: &P| p.memory()),
            self.run(QueryKind::Storage, |p: &P| p.storage()),
            self.run(QueryKind::Network, |p: &P| p.network()),
        );

        match (identity, cpu, memory, storage, network) {
            (Ok(identity), Ok(cpu), Ok(memory), Ok(storage), Ok(network)) => {
                let snapshot = SystemData {
                    hostname: identity.hostname,
                    cpu,
                    memory,
                    storage,
                    network,
                };
                debug!(
                    "snapshot collected in {}ms: {}",
                    started.elapsed().as_millis(),
                    snapshot.summary()
                );
                Ok(snapshot)
            }
            (identity, cpu, memory, storage, network) => {
                let failures: Vec<QueryFailure> = [
                    identity.err(),
                    cpu.err(),
                    memory.err(),
                    storage.err(),
                    network.err(),
                ]
                .into_iter()
                .flatten()
                .collect();
                let err = CollectError { failures };
                warn!("{} (after {}ms)", err, started.elapsed().as_millis());
                Err(err)
            }
        }
    }

    async fn run<T, F>(&self, kind: QueryKind, query: F) -> Result<T, QueryFailure>
    where
        T: Send + 'static,
        F: FnOnce(&P) -> Result<T, ProviderError> + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        let task = spawn_blocking(move || query(provider.as_ref()));

        // A timed-out worker keeps running on the blocking pool; its result is dropped.
        let reason = match timeout(self.query_timeout, task).await {
            Ok(Ok(Ok(value))) => return Ok(value),
            Ok(Ok(Err(err))) => FailureReason::Provider(err),
            Ok(Err(join_err)) => FailureReason::Aborted(join_err.to_string()),
            Err(_) => FailureReason::TimedOut(self.query_timeout),
        };
        Err(QueryFailure { kind, reason })
    }
}
