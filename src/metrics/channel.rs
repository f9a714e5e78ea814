use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::collector::SnapshotCollector;
use super::provider::MetricsProvider;
use super::types::SystemData;

/// What happens when a request arrives while another collection is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Wait for the in-flight collection, then run a fresh one.
    #[default]
    Serialize,
    /// Start immediately, independent of any other call.
    Concurrent,
}

/// Request/response boundary between the display and the collector.
///
/// Holds no snapshot between calls: every request runs exactly one collection
/// and collection failures come back as `None`.
pub struct DeliveryChannel<P> {
    collector: SnapshotCollector<P>,
    policy: OverlapPolicy,
    in_flight: Mutex<()>,
}

impl<P: MetricsProvider> DeliveryChannel<P> {
    pub fn new(collector: SnapshotCollector<P>, policy: OverlapPolicy) -> Self {
        DeliveryChannel {
            collector,
            policy,
            in_flight: Mutex::new(()),
        }
    }

    pub async fn request_snapshot(&self) -> Option<SystemData> {
        match self.policy {
            OverlapPolicy::Serialize => {
                let _guard = self.in_flight.lock().await;
                self.collector.collect().await.ok()
            }
            OverlapPolicy::Concurrent => self.collector.collect().await.ok(),
        }
    }
}
