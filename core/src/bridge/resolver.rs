//! Address resolution: find the attached interface, derive the foreign
//! address from its component id, and publish the pair.

use mixnet_common::error::{BridgeError, ConfigurationError};
use mixnet_common::network::address::{AddressMapping, NativeAddress};
use mixnet_common::network::channel::ChannelBinding;
use mixnet_common::network::topology::{self, AttachedInterface, ComponentId, GateRef, Topology};
use tracing::info;

use crate::ports::outbound::address_directory::AddressDirectory;

/// Everything setup learns about the bridge's attachment. Fixed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub channels: ChannelBinding,
    pub attached: AttachedInterface,
    pub mapping: AddressMapping,
}

/// Resolves `bridge`'s attachment and publishes its address mapping.
///
/// # Errors
/// * [`BridgeError::Configuration`] if a channel is missing or no interface
///   is reachable through `lower_data_out`.
/// * [`BridgeError::DuplicateMapping`] if the interface is already mapped,
///   i.e. another bridge claimed it first.
pub fn resolve(
    topology: &Topology,
    bridge: ComponentId,
    addresses: &dyn AddressDirectory,
) -> Result<Link, BridgeError> {
    let channels = ChannelBinding::resolve(topology, bridge)?;
    let start = GateRef {
        component: bridge,
        gate: channels.lower_data_out,
    };
    let attached = topology::discover_attached(topology, start)?;

    let native = NativeAddress::from(attached.id);
    if native.is_broadcast() {
        return Err(ConfigurationError::ReservedComponentId(attached.id).into());
    }
    let mapping = AddressMapping::derive(native);
    addresses.put(mapping.native, mapping.foreign)?;

    info!("bridge {bridge} attached to '{}': {mapping}", attached.name);
    Ok(Link {
        channels,
        attached,
        mapping,
    })
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
    use crate::bridge::test_support::{BRIDGE, single_node};
    use mixnet_common::network::address::ForeignAddress;
    use mixnet_common::network::topology::ComponentKind;

    #[test]
    fn resolve_publishes_derived_mapping() {
        let topology = single_node(7, Some(1500));
        let addresses = MemoryAddressDirectory::new();
        let link = resolve(&topology, BRIDGE, &addresses).unwrap();

        assert_eq!(link.mapping.native, NativeAddress(7));
        assert_eq!(link.mapping.foreign, ForeignAddress::from_native(NativeAddress(7)));
        assert_eq!(addresses.get(NativeAddress(7)), Some(link.mapping.foreign));
        assert_eq!(link.attached.mtu, Some(1500));
    }

    #[test]
    fn resolve_rejects_second_claim_on_same_interface() {
        let topology = single_node(7, None);
        let addresses = MemoryAddressDirectory::new();
        let first = resolve(&topology, BRIDGE, &addresses).unwrap();
        let err = resolve(&topology, BRIDGE, &addresses).unwrap_err();

        assert!(matches!(err, BridgeError::DuplicateMapping(_)));
        assert_eq!(addresses.get(NativeAddress(7)), Some(first.mapping.foreign));
        assert_eq!(addresses.len(), 1);
    }

    #[test]
    fn resolve_fails_without_interface() {
        let mut topology = single_node(7, None);
        topology.add_component(ComponentId(7), "battery", ComponentKind::Other("battery".to_string()));
        let addresses = MemoryAddressDirectory::new();
        let err = resolve(&topology, BRIDGE, &addresses).unwrap_err();

        assert!(matches!(
            err,
            BridgeError::Configuration(ConfigurationError::NotAnInterface { .. })
        ));
        assert!(addresses.is_empty());
    }

    #[test]
    fn resolve_rejects_broadcast_component_id() {
        let topology = single_node(u32::MAX, None);
        let addresses = MemoryAddressDirectory::new();
        let err = resolve(&topology, BRIDGE, &addresses).unwrap_err();
        assert_eq!(
            err,
            BridgeError::Configuration(ConfigurationError::ReservedComponentId(ComponentId(u32::MAX)))
        );
    }
}
