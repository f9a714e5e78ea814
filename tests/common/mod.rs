#![allow(dead_code)]

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use host_monitor_lib::{
    CpuInfo, HostIdentity, MemoryInfo, MetricsProvider, NetworkInterface, ProviderError,
    QueryKind, StorageInfo, SystemData,
};

pub fn scenario_a() -> SystemData {
    SystemData {
        hostname: "host1".to_string(),
        cpu: CpuInfo {
            manufacturer: "Intel".to_string(),
            brand: "i7".to_string(),
            speed: 3.6,
            cores: 8,
            physical_cores: 4,
        },
        memory: MemoryInfo {
            total: 16_000_000_000,
            free: 8_000_000_000,
            used: 8_000_000_000,
        },
        storage: vec![StorageInfo {
            fs: "/dev/sda1".to_string(),
            size: 500_000_000_000,
            used: 100_000_000_000,
            mount: "/".to_string(),
        }],
        network: vec![NetworkInterface {
            iface: "eth0".to_string(),
            ip4: vec!["192.168.1.2".to_string()],
            ip6: vec![],
        }],
    }
}

fn bit(kind: QueryKind) -> u8 {
    1 << QueryKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default()
}

/// Provider answering from a fixed snapshot, with per-category call counters,
/// switchable failures, optional delays, and an in-flight gauge on identity.
pub struct StubProvider {
    data: SystemData,
    calls: [AtomicUsize; 5],
    failing: AtomicU8,
    panicking: AtomicU8,
    delays: Mutex<Vec<(QueryKind, Duration)>>,
    identity_in_flight: AtomicUsize,
    identity_max_in_flight: AtomicUsize,
}

impl Default for StubProvider {
    fn default() -> Self {
        Self::new(scenario_a())
    }
}

impl StubProvider {
    pub fn new(data: SystemData) -> Self {
        StubProvider {
            data,
            calls: Default::default(),
            failing: AtomicU8::new(0),
            panicking: AtomicU8::new(0),
            delays: Mutex::new(Vec::new()),
            identity_in_flight: AtomicUsize::new(0),
            identity_max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn fail(&self, kinds: &[QueryKind]) {
        let mask = kinds.iter().fold(0u8, |acc, kind| acc | bit(*kind));
        self.failing.store(mask, Ordering::SeqCst);
    }

    pub fn recover(&self) {
        self.failing.store(0, Ordering::SeqCst);
    }

    pub fn panic_on(&self, kind: QueryKind) {
        self.panicking.fetch_or(bit(kind), Ordering::SeqCst);
    }

    pub fn delay(&self, kind: QueryKind, by: Duration) {
        self.delays.lock().expect("delays lock").push((kind, by));
    }

    pub fn calls(&self, kind: QueryKind) -> usize {
        self.calls[bit(kind).trailing_zeros() as usize].load(Ordering::SeqCst)
    }

    pub fn identity_max_in_flight(&self) -> usize {
        self.identity_max_in_flight.load(Ordering::SeqCst)
    }

    fn enter(&self, kind: QueryKind) -> Result<(), ProviderError> {
        self.calls[bit(kind).trailing_zeros() as usize].fetch_add(1, Ordering::SeqCst);

        let delay = self
            .delays
            .lock()
            .expect("delays lock")
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, d)| *d);
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        if self.panicking.load(Ordering::SeqCst) & bit(kind) != 0 {
            panic!("stub provider panicked on {}", kind);
        }
        if self.failing.load(Ordering::SeqCst) & bit(kind) != 0 {
            return Err(ProviderError::Unavailable(format!("stub {}", kind)));
        }
        Ok(())
    }
}

impl MetricsProvider for StubProvider {
    fn identity(&self) -> Result<HostIdentity, ProviderError> {
        let now = self.identity_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.identity_max_in_flight.fetch_max(now, Ordering::SeqCst);
        let result = self.enter(QueryKind::Identity);
        self.identity_in_flight.fetch_sub(1, Ordering::SeqCst);
        result?;
        Ok(HostIdentity {
            hostname: self.data.hostname.clone(),
        })
    }

    fn cpu(&self) -> Result<CpuInfo, ProviderError> {
        self.enter(QueryKind::Cpu)?;
        Ok(self.data.cpu.clone())
    }

    fn memory(&self) -> Result<MemoryInfo, ProviderError> {
        self.enter(QueryKind::Memory)?;
        Ok(self.data.memory.clone())
    }

    fn storage(&self) -> Result<Vec<StorageInfo>, ProviderError> {
        self.enter(QueryKind::Storage)?;
        Ok(self.data.storage.clone())
    }

    fn network(&self) -> Result<Vec<NetworkInterface>, ProviderError> {
        self.enter(QueryKind::Network)?;
        Ok(self.data.network.clone())
    }
}
