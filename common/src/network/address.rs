//! # Address Model
//!
//! The two address spaces the bridge translates between:
//!
//! * [`NativeAddress`]: the lower stack's interface address, which is the
//!   interface component's own id.
//! * [`ForeignAddress`]: the upper stack's 48-bit hardware address.
//!
//! A bridge derives its foreign address from the native one with a fixed,
//! reversible encoding, see [`ForeignAddress::from_native`].

use std::fmt;

use pnet::util::MacAddr;

use crate::network::topology::ComponentId;

/// Leading octets of every bridge-synthesized hardware address.
///
/// `0x0A` has the locally-administered bit set and the multicast bit clear,
/// so synthesized addresses never collide with globally assigned ones.
pub const SYNTHESIZED_PREFIX: [u8; 2] = [0x0A, 0xAA];

/// Lower-stack interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeAddress(pub u32);

impl NativeAddress {
    /// Lower-stack broadcast marker. Never a valid component id.
    pub const BROADCAST: NativeAddress = NativeAddress(u32::MAX);

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl From<ComponentId> for NativeAddress {
    fn from(id: ComponentId) -> Self {
        NativeAddress(id.0)
    }
}

impl fmt::Display for NativeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_broadcast() {
            write!(f, "native:broadcast")
        } else {
            write!(f, "native:{}", self.0)
        }
    }
}

/// Upper-stack hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForeignAddress(pub MacAddr);

impl ForeignAddress {
    pub fn broadcast() -> Self {
        ForeignAddress(MacAddr::broadcast())
    }

    pub fn is_broadcast(&self) -> bool {
        self.0 == MacAddr::broadcast()
    }

    /// Embeds `native` into the low 32 bits behind [`SYNTHESIZED_PREFIX`].
    pub fn from_native(native: NativeAddress) -> Self {
        let [a, b, c, d] = native.0.to_be_bytes();
        let [p0, p1] = SYNTHESIZED_PREFIX;
        ForeignAddress(MacAddr::new(p0, p1, a, b, c, d))
    }

    /// Inverse of [`ForeignAddress::from_native`].
    ///
    /// Returns `None` for addresses that were not synthesized by a bridge.
    pub fn to_native(&self) -> Option<NativeAddress> {
        let MacAddr(p0, p1, a, b, c, d) = self.0;
        if [p0, p1] != SYNTHESIZED_PREFIX {
            return None;
        }
        Some(NativeAddress(u32::from_be_bytes([a, b, c, d])))
    }

    pub fn is_synthesized(&self) -> bool {
        self.to_native().is_some()
    }

    pub fn octets(&self) -> [u8; 6] {
        let MacAddr(a, b, c, d, e, f) = self.0;
        [a, b, c, d, e, f]
    }

    /// Modified EUI-64 interface identifier: `FF:FE` inserted in the middle
    /// and the universal/local bit flipped.
    pub fn interface_token(&self) -> u64 {
        let [a, b, c, d, e, f] = self.octets();
        u64::from_be_bytes([a ^ 0x02, b, c, 0xFF, 0xFE, d, e, f])
    }
}

impl fmt::Display for ForeignAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pair a bridge publishes for its interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressMapping {
    pub native: NativeAddress,
    pub foreign: ForeignAddress,
}

impl AddressMapping {
    pub fn derive(native: NativeAddress) -> Self {
        Self {
            native,
            foreign: ForeignAddress::from_native(native),
        }
    }
}

impl fmt::Display for AddressMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.native, self.foreign)
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
