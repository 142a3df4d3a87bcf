//! # Interface Directory Entries
//!
//! What the upper stack knows about one of its network interfaces.

use std::fmt;

use crate::network::address::ForeignAddress;

/// Stable handle returned by the interface directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfaceHandle(pub usize);

impl fmt::Display for InterfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterfaceFlags {
    pub up: bool,
    pub broadcast: bool,
    pub multicast: bool,
    pub point_to_point: bool,
    pub loopback: bool,
}

impl InterfaceFlags {
    /// Flags of an interface fronted by a bridge: up, broadcast and
    /// multicast capable, neither point-to-point nor loopback.
    pub fn bridged() -> Self {
        Self {
            up: true,
            broadcast: true,
            multicast: true,
            point_to_point: false,
            loopback: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceEntry {
    pub name: String,
    pub hw_address: ForeignAddress,
    /// EUI-64 interface identifier derived from `hw_address`.
    pub interface_token: u64,
    pub mtu: u32,
    pub flags: InterfaceFlags,
}

impl InterfaceEntry {
    pub fn is_up(&self) -> bool {
        self.flags.up
    }

    pub fn is_broadcast(&self) -> bool {
        self.flags.broadcast
    }
}

impl fmt::Display for InterfaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hw={} mtu={} token={:016x}",
            self.name, self.hw_address, self.mtu, self.interface_token
        )
    }
}

/// Keeps ASCII letters and digits only, e.g. `host[3].nic` becomes `host3nic`.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
