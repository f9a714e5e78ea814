use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use super::error::ProviderError;
use super::types::MemoryInfo;

pub fn query_memory() -> Result<MemoryInfo, ProviderError> {
    let system = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    );

    memory_from_counters(
        system.total_memory(),
        system.free_memory(),
        system.used_memory(),
    )
}

/// Validates raw counters. A zero total means the platform gave us nothing usable.
pub(crate) fn memory_from_counters(
    total: u64,
    free: u64,
    used: u64,
) -> Result<MemoryInfo, ProviderError> {
    if total == 0 {
        return Err(ProviderError::Unavailable("memory totals".to_string()));
    }
    if free > total || used > total {
        return Err(ProviderError::Inconsistent(format!(
            "memory counters exceed total (total={}, free={}, used={})",
            total, free, used
        )));
    }

    Ok(MemoryInfo { total, free, used })
}
