//! Interface to upper stack.
//!
//! Data frames get link control info synthesized for the upper stack, with
//! this bridge's own hardware address as source. Control notifications have
//! no counterpart in the upper stack and are dropped here, counted per kind.

use mixnet_common::network::address::{ForeignAddress, NativeAddress};
use mixnet_protocols::lower::ControlNotification;
use mixnet_protocols::message::{ControlInfo, Message, MessageKind};
use mixnet_protocols::upper::{DATA_FRAME_TYPE, LinkControl};
use tracing::{debug, trace, warn};

use super::MixnetBridge;
use crate::ports::outbound::outbox::Outbox;

impl MixnetBridge {
    pub(super) fn on_lower_message(&mut self, mut message: Message, outbox: &mut dyn Outbox) {
        let Some(link) = self.link.as_ref() else {
            return;
        };
        let (own, upper_out) = (link.mapping.foreign, link.channels.upper_out);

        let dest = match message.take_control() {
            Some(ControlInfo::Nic(ctrl)) => {
                trace!("{}: frame from {} for {}", self.name, ctrl.src, ctrl.dest);
                self.foreign_destination(ctrl.dest)
            }
            _ => {
                warn!("{}: lower frame without interface control info, sending up as broadcast", self.name);
                self.stats.missing_control_info += 1;
                ForeignAddress::broadcast()
            }
        };

        message.kind = MessageKind::DATA;
        message.control = Some(ControlInfo::Link(LinkControl {
            src: own,
            dest,
            ether_type: DATA_FRAME_TYPE,
        }));
        debug!("{}: up {} bytes to {dest}", self.name, message.len());
        outbox.send(upper_out, message);
        self.stats.forwarded_up += 1;
    }

    /// Consumes a control notification without emitting anything.
    pub(super) fn on_lower_control(&mut self, message: Message) {
        let notification = ControlNotification::from(message.kind);
        self.stats.record_discard(notification);
        debug!(
            "{}: discarding {notification} control notification ({} so far)",
            self.name,
            self.stats.discarded(notification)
        );
    }

    fn foreign_destination(&self, dest: NativeAddress) -> ForeignAddress {
        if dest.is_broadcast() {
            return ForeignAddress::broadcast();
        }
        self.addresses.get(dest).unwrap_or_else(ForeignAddress::broadcast)
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
