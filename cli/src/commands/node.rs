//! Builds the static topology of a single simulated node.

use std::rc::Rc;

use anyhow::{Context, ensure};
use mixnet_common::config::Config;
use mixnet_common::network::channel::{
    LOWER_CONTROL_IN, LOWER_CONTROL_OUT, LOWER_DATA_IN, LOWER_DATA_OUT, UPPER_IN, UPPER_OUT,
};
use mixnet_common::network::topology::{ComponentId, ComponentKind, Topology};
use mixnet_core::adapters::outbound::memory_interface_directory::MemoryInterfaceDirectory;
use mixnet_core::bridge::MixnetBridge;
use mixnet_core::ports::outbound::address_directory::SharedAddressDirectory;

use crate::commands::NodeArgs;

pub const BRIDGE: ComponentId = ComponentId(1);
pub const NETWORK_LAYER: ComponentId = ComponentId(2);
const FIRST_RELAY: u32 = 100;

/// network layer <-> bridge <-> relays... <-> interface
pub fn build_topology(args: &NodeArgs) -> anyhow::Result<Topology> {
    let nic = ComponentId(args.nic_id);
    ensure!(
        nic != BRIDGE && nic != NETWORK_LAYER,
        "nic id {} is taken by the bridge or the network layer",
        args.nic_id
    );
    ensure!(
        args.nic_id < FIRST_RELAY || args.nic_id >= FIRST_RELAY + args.relays,
        "nic id {} collides with a relay id",
        args.nic_id
    );

    let mut topology = Topology::new();
    topology.add_component(BRIDGE, "bridge", ComponentKind::Bridge);
    topology.add_component(NETWORK_LAYER, "networkLayer", ComponentKind::Other("network layer".into()));
    topology.add_component(nic, format!("host.nic[{}]", args.nic_id), ComponentKind::Interface { mtu: args.nic_mtu });

    topology.connect_named((NETWORK_LAYER, "lower_out"), (BRIDGE, UPPER_IN))?;
    topology.connect_named((BRIDGE, UPPER_OUT), (NETWORK_LAYER, "lower_in"))?;
    topology.connect_named((BRIDGE, LOWER_CONTROL_OUT), (nic, "control_in"))?;
    topology.connect_named((nic, "control_out"), (BRIDGE, LOWER_CONTROL_IN))?;

    // Data path, possibly through relays.
    let mut upper = (BRIDGE, LOWER_DATA_OUT, LOWER_DATA_IN);
    for idx in 0..args.relays {
        let relay = ComponentId(FIRST_RELAY + idx);
        topology.add_component(relay, format!("relay{idx}"), ComponentKind::Passthrough);
        topology.connect_named((upper.0, upper.1), (relay, "upper_in"))?;
        topology.connect_named((relay, "upper_out"), (upper.0, upper.2))?;
        upper = (relay, "lower_out", "lower_in");
    }
    topology.connect_named((upper.0, upper.1), (nic, "upper_in"))?;
    topology.connect_named((nic, "upper_out"), (upper.0, upper.2))?;

    Ok(topology)
}

/// A node: its bridge plus its own interface directory.
pub struct Node {
    pub bridge: MixnetBridge,
    pub interfaces: Rc<MemoryInterfaceDirectory>,
}

pub fn build_node(args: &NodeArgs, addresses: SharedAddressDirectory, cfg: &Config) -> anyhow::Result<Node> {
    let topology = build_topology(args).context("building node topology")?;
    let interfaces = Rc::new(MemoryInterfaceDirectory::new());
    let bridge = MixnetBridge::new(BRIDGE, Rc::new(topology), addresses, cfg.clone())
        .with_interface_directory(interfaces.clone());
    Ok(Node { bridge, interfaces })
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
    use mixnet_common::network::topology::discover_attached;

    fn args(nic_id: u32, relays: u32) -> NodeArgs {
        NodeArgs {
            nic_id,
            relays,
            nic_mtu: Some(1280),
        }
    }

    #[test]
    fn relays_are_transparent_to_discovery() {
        for relays in [0, 1, 3] {
            let topology = build_topology(&args(7, relays)).unwrap();
            let start = topology.gate(BRIDGE, LOWER_DATA_OUT).unwrap();
            let attached = discover_attached(&topology, start).unwrap();
            assert_eq!(attached.id, ComponentId(7));
            assert_eq!(attached.mtu, Some(1280));
        }
    }

    #[test]
    fn reserved_ids_are_refused() {
        assert!(build_topology(&args(BRIDGE.0, 0)).is_err());
        assert!(build_topology(&args(NETWORK_LAYER.0, 0)).is_err());
        assert!(build_topology(&args(FIRST_RELAY + 1, 2)).is_err());
        assert!(build_topology(&args(FIRST_RELAY + 2, 2)).is_ok());
    }
}
