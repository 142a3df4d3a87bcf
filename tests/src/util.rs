#![cfg(test)]
use std::rc::Rc;

use mixnet_common::config::Config;
use mixnet_common::network::channel::{
    LOWER_CONTROL_IN, LOWER_CONTROL_OUT, LOWER_DATA_IN, LOWER_DATA_OUT, UPPER_IN, UPPER_OUT,
};
use mixnet_common::network::topology::{ComponentId, ComponentKind, Topology};
use mixnet_core::adapters::outbound::memory_address_directory::MemoryAddressDirectory;
use mixnet_core::adapters::outbound::memory_interface_directory::MemoryInterfaceDirectory;
use mixnet_core::bridge::MixnetBridge;

pub const BRIDGE: ComponentId = ComponentId(1);
pub const NETWORK_LAYER: ComponentId = ComponentId(2);

/// One host: network layer, bridge, `relays` passthroughs and the nic.
pub fn host(nic_id: u32, relays: u32, mtu: Option<u32>) -> Topology {
    let nic = ComponentId(nic_id);
    let mut topology = Topology::new();
    topology.add_component(BRIDGE, "bridge", ComponentKind::Bridge);
    topology.add_component(NETWORK_LAYER, "networkLayer", ComponentKind::Other("network layer".into()));
    topology.add_component(nic, format!("host[{nic_id}].wlan"), ComponentKind::Interface { mtu });

    topology.connect_named((NETWORK_LAYER, "lower_out"), (BRIDGE, UPPER_IN)).unwrap();
    topology.connect_named((BRIDGE, UPPER_OUT), (NETWORK_LAYER, "lower_in")).unwrap();
    topology.connect_named((BRIDGE, LOWER_CONTROL_OUT), (nic, "control_in")).unwrap();
    topology.connect_named((nic, "control_out"), (BRIDGE, LOWER_CONTROL_IN)).unwrap();

    let mut above = (BRIDGE, LOWER_DATA_OUT, LOWER_DATA_IN);
    for idx in 0..relays {
        let relay = ComponentId(500 + idx);
        topology.add_component(relay, format!("queue{idx}"), ComponentKind::Passthrough);
        topology.connect_named((above.0, above.1), (relay, "in")).unwrap();
        topology.connect_named((relay, "back"), (above.0, above.2)).unwrap();
        above = (relay, "out", "ret");
    }
    topology.connect_named((above.0, above.1), (nic, "upper_in")).unwrap();
    topology.connect_named((nic, "upper_out"), (above.0, above.2)).unwrap();
    topology
}

pub fn bridge(
    topology: Topology,
    addresses: &Rc<MemoryAddressDirectory>,
    interfaces: &Rc<MemoryInterfaceDirectory>,
) -> MixnetBridge {
    MixnetBridge::new(BRIDGE, Rc::new(topology), addresses.clone(), Config::default())
        .with_interface_directory(interfaces.clone())
}
