use sysinfo::System;

use super::error::ProviderError;
use super::types::HostIdentity;

/// A missing or blank hostname is reported as an empty string, not a failure.
pub fn query_identity() -> Result<HostIdentity, ProviderError> {
    Ok(identity_from_host_name(System::host_name()))
}

pub(crate) fn identity_from_host_name(host_name: Option<String>) -> HostIdentity {
    HostIdentity {
        hostname: host_name
            .map(|name| name.trim().to_string())
            .unwrap_or_default(),
    }
}
