//! Interface registration with the upper stack's interface directory.

use mixnet_common::config::Config;
use mixnet_common::network::interface::{self, InterfaceEntry, InterfaceFlags, InterfaceHandle};
use tracing::info;

use crate::bridge::resolver::Link;
use crate::ports::outbound::interface_directory::InterfaceDirectory;

/// The directory entry describing the bridged interface.
pub fn interface_entry(link: &Link, config: &Config) -> InterfaceEntry {
    let hw_address = link.mapping.foreign;
    let name = config
        .interface_name
        .clone()
        .unwrap_or_else(|| interface::sanitize_name(&link.attached.name));
    let name = if name.is_empty() {
        format!("nic{}", link.mapping.native.0)
    } else {
        name
    };

    InterfaceEntry {
        name,
        hw_address,
        interface_token: hw_address.interface_token(),
        mtu: link.attached.mtu.unwrap_or(config.default_mtu),
        flags: InterfaceFlags::bridged(),
    }
}

pub fn register(directory: &dyn InterfaceDirectory, link: &Link, config: &Config) -> InterfaceHandle {
    let entry = interface_entry(link, config);
    let handle = directory.register_entry(entry.clone());
    info!("registered interface {handle}: {entry}");
    handle
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory_address_directory::MemoryAddressDirectory;
    use crate::adapters::outbound::memory_interface_directory::MemoryInterfaceDirectory;
    use crate::bridge::resolver;
    use crate::bridge::test_support::{BRIDGE, single_node};

    fn link(mtu: Option<u32>) -> Link {
        let topology = single_node(7, mtu);
        resolver::resolve(&topology, BRIDGE, &MemoryAddressDirectory::new()).unwrap()
    }

    #[test]
    fn entry_copies_declared_mtu() {
        let entry = interface_entry(&link(Some(2304)), &Config::default());
        assert_eq!(entry.mtu, 2304);
    }

    #[test]
    fn entry_falls_back_to_default_mtu() {
        let config = Config {
            default_mtu: 1280,
            ..Config::default()
        };
        assert_eq!(interface_entry(&link(None), &config).mtu, 1280);
    }

    #[test]
    fn entry_carries_resolved_hw_address_and_flags() {
        let link = link(None);
        let entry = interface_entry(&link, &Config::default());
        assert_eq!(entry.hw_address, link.mapping.foreign);
        assert_eq!(entry.interface_token, link.mapping.foreign.interface_token());
        assert!(entry.is_up());
        assert!(entry.is_broadcast());
        assert_eq!(entry.name, "host7nic");
    }

    #[test]
    fn entry_name_can_be_overridden() {
        let config = Config {
            interface_name: Some("wlan0".to_string()),
            ..Config::default()
        };
        assert_eq!(interface_entry(&link(None), &config).name, "wlan0");
    }

    #[test]
    fn register_twice_keeps_one_entry() {
        let link = link(None);
        let directory = MemoryInterfaceDirectory::new();
        let first = register(&directory, &link, &Config::default());
        let second = register(&directory, &link, &Config::default());
        assert_eq!(first, second);
        assert_eq!(directory.len(), 1);
    }
}
