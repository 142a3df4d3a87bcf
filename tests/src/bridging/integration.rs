#![cfg(test)]
use std::rc::Rc;

use mixnet_common::error::BridgeError;
use mixnet_common::network::address::{ForeignAddress, NativeAddress};
use mixnet_common::network::channel::ChannelId;
use mixnet_common::network::interface::InterfaceEntry;
use mixnet_core::adapters::outbound::memory_address_directory::MemoryAddressDirectory;
use mixnet_core::adapters::outbound::memory_interface_directory::MemoryInterfaceDirectory;
use mixnet_core::adapters::outbound::recording_outbox::RecordingOutbox;
use mixnet_core::host::run_setup;
use mixnet_core::ports::inbound::SimModule;
use mixnet_core::ports::outbound::address_directory::AddressDirectory;
use mixnet_core::ports::outbound::interface_directory::InterfaceDirectory;
use mixnet_core::ports::outbound::outbox::Outbox;
use mixnet_protocols::lower::{BRIDGED_PROTOCOL, NicControl, kinds};
use mixnet_protocols::message::{ControlInfo, Message, MessageKind};
use mixnet_protocols::upper::{DATA_FRAME_TYPE, LinkControl};
use pnet::util::MacAddr;

use crate::util::{bridge, host};

/*************************************************************
                    End-to-end routing
**************************************************************/

#[test]
fn lower_frame_reaches_upper_stack_with_bridge_source() {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let interfaces = Rc::new(MemoryInterfaceDirectory::new());
    let mut bridge = bridge(host(7, 0, None), &addresses, &interfaces);
    run_setup(&mut [&mut bridge]).unwrap();

    let v7 = ForeignAddress(MacAddr::new(0x0A, 0xAA, 0, 0, 0, 7));
    assert_eq!(bridge.foreign_address(), Some(v7));

    let channels = bridge.channels().unwrap();
    let mut outbox = RecordingOutbox::new();
    let control = NicControl::received(NativeAddress(3), NativeAddress(7), 4);
    let message = Message::data("PKT1").with_control(ControlInfo::Nic(control));
    bridge.dispatch(channels.lower_data_in, message, &mut outbox).unwrap();

    assert_eq!(outbox.len(), 1);
    let up = outbox.on(channels.upper_out);
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].payload, b"PKT1".to_vec());
    let link = up[0].link_control().unwrap();
    assert_eq!(link.src, v7);
    assert_eq!(link.ether_type, DATA_FRAME_TYPE);
}

#[test]
fn unresolved_destination_goes_down_as_broadcast() {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let interfaces = Rc::new(MemoryInterfaceDirectory::new());
    let mut bridge = bridge(host(7, 0, None), &addresses, &interfaces);
    run_setup(&mut [&mut bridge]).unwrap();

    let channels = bridge.channels().unwrap();
    let mut outbox = RecordingOutbox::new();
    let off_node = ForeignAddress(MacAddr::new(0x00, 0x1B, 0x21, 0x3C, 0x4D, 0x5E));
    let message = Message::data("PKT2").with_control(ControlInfo::Link(LinkControl::to(off_node)));

    assert!(bridge.dispatch(channels.upper_in, message, &mut outbox).is_ok());

    let down = outbox.on(channels.lower_data_out);
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].payload, b"PKT2".to_vec());
    let nic = down[0].nic_control().unwrap();
    assert!(nic.dest.is_broadcast());
    assert_eq!(nic.src, NativeAddress(7));
    assert_eq!(nic.protocol, BRIDGED_PROTOCOL);
    assert_eq!(bridge.stats().unresolved_destinations, 1);
}

#[test]
fn peers_sharing_a_directory_translate_each_other() {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let interfaces_a = Rc::new(MemoryInterfaceDirectory::new());
    let interfaces_b = Rc::new(MemoryInterfaceDirectory::new());
    let mut a = bridge(host(7, 0, None), &addresses, &interfaces_a);
    let mut b = bridge(host(9, 2, Some(2304)), &addresses, &interfaces_b);
    run_setup(&mut [&mut a, &mut b]).unwrap();
    assert_eq!(addresses.len(), 2);

    // a -> b: upper stack of a addresses b by its hardware address.
    let b_foreign = b.foreign_address().unwrap();
    let a_channels = a.channels().unwrap();
    let mut a_out = RecordingOutbox::new();
    let message = Message::data("hello").with_control(ControlInfo::Link(LinkControl::to(b_foreign)));
    a.dispatch(a_channels.upper_in, message, &mut a_out).unwrap();

    let (channel, frame) = a_out.drain().remove(0);
    assert_eq!(channel, a_channels.lower_data_out);
    let nic = *frame.nic_control().unwrap();
    assert_eq!(nic.src, NativeAddress(7));
    assert_eq!(nic.dest, NativeAddress(9));
    assert_eq!(nic.length, 5);

    // The lower stack delivers it to b.
    let b_channels = b.channels().unwrap();
    let mut b_out = RecordingOutbox::new();
    let delivered = Message::data(frame.payload.clone())
        .with_control(ControlInfo::Nic(NicControl::received(nic.src, nic.dest, nic.length)));
    b.dispatch(b_channels.lower_data_in, delivered, &mut b_out).unwrap();

    let up = b_out.on(b_channels.upper_out);
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].payload, b"hello".to_vec());
    let link = up[0].link_control().unwrap();
    assert_eq!(link.src, b_foreign);
    assert_eq!(link.dest, b_foreign);
}

#[test]
fn control_notifications_never_leave_the_bridge() {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let interfaces = Rc::new(MemoryInterfaceDirectory::new());
    let mut bridge = bridge(host(7, 1, None), &addresses, &interfaces);
    run_setup(&mut [&mut bridge]).unwrap();

    let channels = bridge.channels().unwrap();
    let mut outbox = RecordingOutbox::new();
    for kind in [kinds::TX_OVER, kinds::MEDIUM_BUSY, kinds::TX_OVER, MessageKind(77)] {
        bridge.dispatch(channels.lower_control_in, Message::new(kind, Vec::new()), &mut outbox).unwrap();
    }

    assert!(outbox.is_empty());
    assert_eq!(bridge.stats().discarded_total(), 4);
    assert_eq!(bridge.stats().discarded(kinds::TX_OVER.into()), 2);
    assert_eq!(bridge.stats().discarded(MessageKind(77).into()), 1);
}

/*************************************************************
                    Setup and lifecycle
**************************************************************/

#[test]
fn second_bridge_on_same_interface_fails_setup() {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let interfaces = Rc::new(MemoryInterfaceDirectory::new());
    let mut first = bridge(host(7, 0, None), &addresses, &interfaces);
    let mut second = bridge(host(7, 0, None), &addresses, &interfaces);

    let err = run_setup(&mut [&mut first, &mut second]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BridgeError>(),
        Some(BridgeError::DuplicateMapping(_))
    ));
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses.get(NativeAddress(7)), first.foreign_address());
    assert_eq!(interfaces.len(), 1);
}

#[test]
fn dropping_bridge_withdraws_mapping() {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let interfaces = Rc::new(MemoryInterfaceDirectory::new());
    let foreign = {
        let mut bridge = bridge(host(7, 0, None), &addresses, &interfaces);
        run_setup(&mut [&mut bridge]).unwrap();
        bridge.foreign_address().unwrap()
    };
    assert!(addresses.get(NativeAddress(7)).is_none());
    assert!(addresses.get_reverse(foreign).is_none());
}

/// Sibling that looks up its node's interface in stage 1.
struct RouteTable {
    interfaces: Rc<MemoryInterfaceDirectory>,
    hw_address: ForeignAddress,
    seen: Option<InterfaceEntry>,
}

impl SimModule for RouteTable {
    fn name(&self) -> &str {
        "routeTable"
    }

    fn num_setup_stages(&self) -> u8 {
        2
    }

    fn on_setup(&mut self, stage: u8) -> anyhow::Result<()> {
        if stage == 1 {
            self.seen = self
                .interfaces
                .find_by_hw_address(self.hw_address)
                .and_then(|handle| self.interfaces.entry(handle));
        }
        Ok(())
    }

    fn on_message(&mut self, _: ChannelId, _: Message, _: &mut dyn Outbox) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn stage_one_sibling_sees_registered_interface() {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let interfaces = Rc::new(MemoryInterfaceDirectory::new());
    let mut bridge = bridge(host(12, 1, Some(1280)), &addresses, &interfaces);
    let mut routes = RouteTable {
        interfaces: interfaces.clone(),
        hw_address: ForeignAddress::from_native(NativeAddress(12)),
        seen: None,
    };

    // The sibling comes first in stage order and still sees the entry.
    run_setup(&mut [&mut routes, &mut bridge]).unwrap();

    let entry = routes.seen.unwrap();
    assert_eq!(entry.name, "host12wlan");
    assert_eq!(entry.mtu, 1280);
    assert!(entry.is_up());
    assert!(entry.is_broadcast());
    assert!(entry.flags.multicast);
    assert!(!entry.flags.point_to_point);
}
