use std::rc::Rc;

use anyhow::ensure;
use colored::*;
use pnet::util::MacAddr;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use mixnet_common::config::Config;
use mixnet_common::network::address::{ForeignAddress, NativeAddress};
use mixnet_core::adapters::outbound::memory_address_directory::MemoryAddressDirectory;
use mixnet_core::adapters::outbound::recording_outbox::RecordingOutbox;
use mixnet_core::bridge::MixnetBridge;
use mixnet_core::host::run_setup;
use mixnet_core::ports::inbound::SimModule;
use mixnet_core::ports::outbound::address_directory::AddressDirectory;
use mixnet_protocols::lower::{NicControl, kinds};
use mixnet_protocols::message::{ControlInfo, Message, MessageKind};
use mixnet_protocols::upper::LinkControl;

use crate::commands::NodeArgs;
use crate::commands::node::{Node, build_node};
use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

const FIRST_PEER_NIC: u32 = 200;

/// Upper-stack address no bridge ever publishes.
const STRANGER: ForeignAddress = ForeignAddress(MacAddr(0x02, 0x00, 0x5E, 0x10, 0x00, 0x01));

const CONTROL_KINDS: [MessageKind; 5] = [
    kinds::TX_OVER,
    kinds::PACKET_DROPPED,
    kinds::MEDIUM_BUSY,
    kinds::MEDIUM_IDLE,
    MessageKind(9),
];

pub fn simulate(args: &NodeArgs, messages: u32, peers: u32, seed: u64, cfg: &Config) -> anyhow::Result<()> {
    let addresses = Rc::new(MemoryAddressDirectory::new());
    let Node { mut bridge, .. } = build_node(args, addresses.clone(), cfg)?;

    let mut peer_bridges: Vec<MixnetBridge> = Vec::new();
    for nic_id in (FIRST_PEER_NIC..).filter(|id| *id != args.nic_id).take(peers as usize) {
        let peer_args = NodeArgs {
            nic_id,
            relays: 0,
            nic_mtu: None,
        };
        peer_bridges.push(build_node(&peer_args, addresses.clone(), cfg)?.bridge);
    }

    {
        let mut modules: Vec<&mut dyn SimModule> = Vec::with_capacity(peer_bridges.len() + 1);
        modules.push(&mut bridge);
        for peer in peer_bridges.iter_mut() {
            modules.push(peer);
        }
        run_setup(&mut modules)?;
    }

    let peer_natives: Vec<NativeAddress> = peer_bridges.iter().filter_map(|peer| peer.native_address()).collect();
    ensure!(peer_natives.len() == peer_bridges.len(), "peer bridge did not resolve");
    let own_native = bridge.native_address().unwrap_or(NativeAddress::BROADCAST);
    let channels = bridge
        .channels()
        .ok_or_else(|| anyhow::anyhow!("bridge has no channel binding after setup"))?;
    info!("{} peers share the address directory ({} mappings)", peer_natives.len(), addresses.len());

    let mut rng = StdRng::seed_from_u64(seed);
    let mut outbox = RecordingOutbox::new();
    for seq in 0..messages {
        let payload = format!("PKT{seq}").into_bytes();
        let (channel, message) = match rng.random_range(0..3) {
            0 => {
                let dest = pick_foreign(&mut rng, &peer_natives);
                let mut message = Message::data(payload);
                if rng.random_range(0..10) > 0 {
                    message = message.with_control(ControlInfo::Link(LinkControl::to(dest)));
                }
                (channels.upper_in, message)
            }
            1 => {
                let src = pick_native(&mut rng, &peer_natives);
                let dest = if rng.random() { own_native } else { NativeAddress::BROADCAST };
                let length = payload.len();
                let message =
                    Message::data(payload).with_control(ControlInfo::Nic(NicControl::received(src, dest, length)));
                (channels.lower_data_in, message)
            }
            _ => {
                let kind = CONTROL_KINDS[rng.random_range(0..CONTROL_KINDS.len())];
                (channels.lower_control_in, Message::new(kind, Vec::new()))
            }
        };
        debug!("message {seq} on {channel}");
        bridge.dispatch(channel, message, &mut outbox)?;
    }

    print::tree_head(0, "traffic");
    let stats = bridge.stats();
    let details: Vec<Detail> = vec![
        ("Delivered".to_string(), messages.to_string().normal()),
        ("Forwarded down".to_string(), stats.forwarded_down.to_string().color(colors::NATIVE_ADDR)),
        ("Forwarded up".to_string(), stats.forwarded_up.to_string().color(colors::FOREIGN_ADDR)),
        ("Unresolved".to_string(), stats.unresolved_destinations.to_string().normal()),
        ("No control info".to_string(), stats.missing_control_info.to_string().normal()),
        ("Discarded".to_string(), stats.discarded_total().to_string().color(colors::ACCENT)),
    ];
    print::as_tree_one_level(details);

    let discards: Vec<Detail> = stats
        .discards()
        .map(|(kind, count)| (kind.to_string(), count.to_string().normal()))
        .collect();
    if !discards.is_empty() {
        print::tree_head(1, "discarded notifications");
        print::as_tree_one_level(discards);
    }
    Ok(())
}

/// A peer's address most of the time, otherwise broadcast or a stranger.
fn pick_foreign(rng: &mut StdRng, peers: &[NativeAddress]) -> ForeignAddress {
    match rng.random_range(0..8) {
        0 => ForeignAddress::broadcast(),
        1 => STRANGER,
        _ => ForeignAddress::from_native(pick_native(rng, peers)),
    }
}

fn pick_native(rng: &mut StdRng, peers: &[NativeAddress]) -> NativeAddress {
    if peers.is_empty() {
        return NativeAddress::BROADCAST;
    }
    peers[rng.random_range(0..peers.len())]
}
