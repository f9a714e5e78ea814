mod channel;
mod collector;
mod cpu;
mod disk;
mod error;
mod identity;
mod memory;
mod network;
mod poller;
mod provider;
mod types;

pub use channel::{DeliveryChannel, OverlapPolicy};
pub use collector::{SnapshotCollector, DEFAULT_QUERY_TIMEOUT};
pub use error::{CollectError, FailureReason, ProviderError, QueryFailure, QueryKind};
pub use poller::{SnapshotPoller, SnapshotSink, DEFAULT_POLL_INTERVAL};
pub use provider::{MetricsProvider, SysinfoProvider};
pub use types::{CpuInfo, HostIdentity, MemoryInfo, NetworkInterface, StorageInfo, SystemData};
