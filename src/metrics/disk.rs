use sysinfo::Disks;

use super::error::ProviderError;
use super::types::StorageInfo;

/// One entry per mounted filesystem. An empty list is a valid answer.
pub fn query_storage() -> Result<Vec<StorageInfo>, ProviderError> {
    let disks = Disks::new_with_refreshed_list();

    let storage = disks
        .list()
        .iter()
        .map(|disk| {
            storage_entry(
                disk.name().to_string_lossy().to_string(),
                disk.mount_point().to_string_lossy().to_string(),
                disk.total_space(),
                disk.available_space(),
            )
        })
        .collect();

    Ok(storage)
}

pub(crate) fn storage_entry(fs: String, mount: String, size: u64, available: u64) -> StorageInfo {
    StorageInfo {
        fs,
        size,
        used: size.saturating_sub(available),
        mount,
    }
}
