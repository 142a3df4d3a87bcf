//! Upper-stack control info: the link-layer record its network layer
//! attaches to outgoing frames and expects on incoming ones.

use mixnet_common::network::address::ForeignAddress;
use pnet::packet::ethernet::{EtherType, EtherTypes};

/// Type tag put on every frame the bridge hands to the upper stack.
pub const DATA_FRAME_TYPE: EtherType = EtherTypes::Ipv4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkControl {
    pub src: ForeignAddress,
    pub dest: ForeignAddress,
    pub ether_type: EtherType,
}

impl LinkControl {
    /// Outgoing control info as the upper network layer builds it.
    pub fn to(dest: ForeignAddress) -> Self {
        Self {
            src: ForeignAddress::broadcast(),
            dest,
            ether_type: DATA_FRAME_TYPE,
        }
    }
}
