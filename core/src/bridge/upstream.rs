//! Upper stack to interface.
//!
//! The link control info is replaced by interface control info whose next
//! hop is the native address behind the foreign destination. Destinations
//! the directory does not know (off-node addresses, plain typos) go out as
//! broadcast: the bridge has no routing duty beyond the local handoff.

use mixnet_common::network::address::{ForeignAddress, NativeAddress};
use mixnet_protocols::lower::{BRIDGED_PROTOCOL, NicControl};
use mixnet_protocols::message::{ControlInfo, Message, MessageKind};
use tracing::{debug, warn};

use super::MixnetBridge;
use crate::ports::outbound::outbox::Outbox;

impl MixnetBridge {
    pub(super) fn on_upper_message(&mut self, mut message: Message, outbox: &mut dyn Outbox) {
        let Some(link) = self.link.as_ref() else {
            return;
        };
        let (own, lower_data_out) = (link.mapping.native, link.channels.lower_data_out);

        let dest = match message.take_control() {
            Some(ControlInfo::Link(ctrl)) => self.native_destination(ctrl.dest),
            other => {
                warn!(
                    "{}: upper frame without link control info ({}), sending as broadcast",
                    self.name,
                    if other.is_some() { "wrong schema" } else { "none" }
                );
                self.stats.missing_control_info += 1;
                NativeAddress::BROADCAST
            }
        };

        message.kind = MessageKind::DATA;
        message.control = Some(ControlInfo::Nic(NicControl {
            src: own,
            dest,
            length: message.len(),
            protocol: BRIDGED_PROTOCOL,
        }));
        debug!("{}: down {} bytes to {dest}", self.name, message.len());
        outbox.send(lower_data_out, message);
        self.stats.forwarded_down += 1;
    }

    fn native_destination(&mut self, dest: ForeignAddress) -> NativeAddress {
        if dest.is_broadcast() {
            return NativeAddress::BROADCAST;
        }
        match self.addresses.get_reverse(dest) {
            Some(native) => native,
            None => {
                debug!("{}: {dest} is not a bridged interface, sending as broadcast", self.name);
                self.stats.unresolved_destinations += 1;
                NativeAddress::BROADCAST
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
