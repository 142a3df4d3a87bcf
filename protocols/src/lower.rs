//! Lower-stack control info and the control notifications an interface
//! raises on its control channel.

use std::fmt;

use mixnet_common::network::address::NativeAddress;

use crate::message::MessageKind;

/// Protocol tag the bridge puts on every frame it hands to the interface.
pub const BRIDGED_PROTOCOL: u16 = 0x0800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NicControl {
    pub src: NativeAddress,
    /// Next hop. [`NativeAddress::BROADCAST`] for broadcast and unresolved.
    pub dest: NativeAddress,
    /// Declared payload length in bytes.
    pub length: usize,
    pub protocol: u16,
}

impl NicControl {
    /// Incoming control info as an interface attaches it to received frames.
    pub fn received(src: NativeAddress, dest: NativeAddress, length: usize) -> Self {
        Self {
            src,
            dest,
            length,
            protocol: BRIDGED_PROTOCOL,
        }
    }
}

/// Kind tags of interface control notifications.
pub mod kinds {
    use crate::message::MessageKind;

    pub const TX_OVER: MessageKind = MessageKind(23500);
    pub const PACKET_DROPPED: MessageKind = MessageKind(23501);
    pub const MEDIUM_BUSY: MessageKind = MessageKind(23502);
    pub const MEDIUM_IDLE: MessageKind = MessageKind(23503);
}

/// A control notification, typed by its kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlNotification {
    /// Transmission of the last frame finished.
    TxOver,
    /// The interface dropped a frame (queue full, retries exhausted).
    PacketDropped,
    MediumBusy,
    MediumIdle,
    Other(MessageKind),
}

impl From<MessageKind> for ControlNotification {
    fn from(kind: MessageKind) -> Self {
        match kind {
            kinds::TX_OVER => ControlNotification::TxOver,
            kinds::PACKET_DROPPED => ControlNotification::PacketDropped,
            kinds::MEDIUM_BUSY => ControlNotification::MediumBusy,
            kinds::MEDIUM_IDLE => ControlNotification::MediumIdle,
            other => ControlNotification::Other(other),
        }
    }
}

impl From<ControlNotification> for MessageKind {
    fn from(notification: ControlNotification) -> Self {
        match notification {
            ControlNotification::TxOver => kinds::TX_OVER,
            ControlNotification::PacketDropped => kinds::PACKET_DROPPED,
            ControlNotification::MediumBusy => kinds::MEDIUM_BUSY,
            ControlNotification::MediumIdle => kinds::MEDIUM_IDLE,
            ControlNotification::Other(kind) => kind,
        }
    }
}

impl fmt::Display for ControlNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlNotification::TxOver => write!(f, "tx-over"),
            ControlNotification::PacketDropped => write!(f, "packet-dropped"),
            ControlNotification::MediumBusy => write!(f, "medium-busy"),
            ControlNotification::MediumIdle => write!(f, "medium-idle"),
            ControlNotification::Other(kind) => write!(f, "{kind}"),
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
