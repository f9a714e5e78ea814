use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostIdentity {
    pub hostname: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    pub manufacturer: String,
    pub brand: String,
    /// Nominal clock in GHz.
    pub speed: f64,
    pub cores: u32,
    pub physical_cores: u32,
}

/// Byte counts. `used` and `free` are each bounded by `total` but need not sum to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total: u64,
    pub free: u64,
    pub used: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub fs: String,
    pub size: u64,
    pub used: u64,
    pub mount: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub iface: String,
    pub ip4: Vec<String>,
    pub ip6: Vec<String>,
}

/// One complete snapshot of host state, assembled by a single collection call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemData {
    pub hostname: String,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub storage: Vec<StorageInfo>,
    pub network: Vec<NetworkInterface>,
}

impl SystemData {
    /// One-line summary used in debug logs.
    pub fn summary(&self) -> String {
        let storage_used: u64 = self.storage.iter().map(|s| s.used).sum();
        format!(
            "{} | {} x{} | mem {}/{} | {} fs ({} used) | {} ifaces",
            self.hostname,
            self.cpu.brand,
            self.cpu.cores,
            bytesize::ByteSize(self.memory.used),
            bytesize::ByteSize(self.memory.total),
            self.storage.len(),
            bytesize::ByteSize(storage_used),
            self.network.len(),
        )
    }
}
