use super::cpu::query_cpu;
use super::disk::query_storage;
use super::error::ProviderError;
use super::identity::query_identity;
use super::memory::query_memory;
use super::network::query_network;
use super::types::{CpuInfo, HostIdentity, MemoryInfo, NetworkInterface, StorageInfo};

/// Source of raw host facts.
///
/// Every method is a blocking call answering one category. Implementations must
/// be internally consistent per call; nothing is assumed across calls. The
/// collector moves calls onto the blocking pool, hence `Send + Sync + 'static`.
pub trait MetricsProvider: Send + Sync + 'static {
    fn identity(&self) -> Result<HostIdentity, ProviderError>;
    fn cpu(&self) -> Result<CpuInfo, ProviderError>;
    fn memory(&self) -> Result<MemoryInfo, ProviderError>;
    fn storage(&self) -> Result<Vec<StorageInfo>, ProviderError>;
    fn network(&self) -> Result<Vec<NetworkInterface>, ProviderError>;
}

/// Provider backed by `sysinfo`. Stateless: each query builds its own handles.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysinfoProvider;

impl SysinfoProvider {
    pub fn new() -> Self {
        SysinfoProvider
    }
}

impl MetricsProvider for SysinfoProvider {
    fn identity(&self) -> Result<HostIdentity, ProviderError> {
        query_identity()
    }

    fn cpu(&self) -> Result<CpuInfo, ProviderError> {
        query_cpu()
    }

    fn memory(&self) -> Result<MemoryInfo, ProviderError> {
        query_memory()
    }

    fn storage(&self) -> Result<Vec<StorageInfo>, ProviderError> {
        query_storage()
    }

    fn network(&self) -> Result<Vec<NetworkInterface>, ProviderError> {
        query_network()
    }
}
