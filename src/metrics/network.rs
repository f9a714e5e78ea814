use std::collections::BTreeSet;
use std::net::IpAddr;

use sysinfo::Networks;

use super::error::ProviderError;
use super::types::NetworkInterface;

pub fn query_network() -> Result<Vec<NetworkInterface>, ProviderError> {
    let networks = Networks::new_with_refreshed_list();

    let mut interfaces: Vec<NetworkInterface> = networks
        .iter()
        .map(|(name, data)| interface_entry(name, data.ip_networks().iter().map(|net| net.addr)))
        .collect();
    interfaces.sort_by(|a, b| a.iface.cmp(&b.iface));

    Ok(interfaces)
}

/// Splits addresses by family; each list is de-duplicated and sorted.
pub(crate) fn interface_entry(
    name: &str,
    addrs: impl IntoIterator<Item = IpAddr>,
) -> NetworkInterface {
    let mut ip4 = BTreeSet::new();
    let mut ip6 = BTreeSet::new();
    for addr in addrs {
        match addr {
            IpAddr::V4(v4) => {
                ip4.insert(v4.to_string());
            }
            IpAddr::V6(v6) => {
                ip6.insert(v6.to_string());
            }
        }
    }

    NetworkInterface {
        iface: name.to_string(),
        ip4: ip4.into_iter().collect(),
        ip6: ip6.into_iter().collect(),
    }
}
