//! # Error Taxonomy
//!
//! Setup failures are fatal and abort construction of the simulated node.
//! Routing never fails for protocol reasons: unresolved destinations degrade
//! to broadcast and unsupported control notifications are discarded, so
//! neither appears here.

use thiserror::Error;

use crate::network::address::{ForeignAddress, NativeAddress};
use crate::network::topology::{ComponentId, GateId, GateRef};

/// The static topology does not describe a usable bridge attachment.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigurationError {
    #[error("component {0} does not exist in the topology")]
    UnknownComponent(ComponentId),

    #[error("component {component} has no gate named '{gate}'")]
    MissingGate { component: ComponentId, gate: String },

    #[error("gate {0} is not connected to anything")]
    Unconnected(GateRef),

    #[error("gate {from} is already connected to {existing}")]
    AlreadyConnected { from: GateRef, existing: GateRef },

    #[error("path from the bridge ends at passthrough {0} with no onward connection")]
    DeadEnd(ComponentId),

    #[error("path from the bridge is ambiguous at {at}: candidates {candidates:?}")]
    Ambiguous {
        at: ComponentId,
        candidates: Vec<ComponentId>,
    },

    #[error("path from the bridge loops back to {0}")]
    Cyclic(ComponentId),

    #[error("bridge is attached to another bridge ({0})")]
    AttachedToBridge(ComponentId),

    #[error("attached component {component} is a {kind}, not a network interface")]
    NotAnInterface { component: ComponentId, kind: String },

    #[error("component id {0} collides with the lower-stack broadcast address")]
    ReservedComponentId(ComponentId),
}

/// A mapping would reuse an address that is already mapped, on either side.
///
/// Signals two bridges sharing one interface.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DuplicateMappingError {
    #[error("{native} is already mapped to {existing}, refusing to map it to {attempted}")]
    Native {
        native: NativeAddress,
        existing: ForeignAddress,
        attempted: ForeignAddress,
    },

    #[error("{foreign} is already mapped from {existing}, refusing to map it from {attempted}")]
    Foreign {
        foreign: ForeignAddress,
        existing: NativeAddress,
        attempted: NativeAddress,
    },
}

/// Everything a bridge can report to its host.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BridgeError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("duplicate address mapping: {0}")]
    DuplicateMapping(#[from] DuplicateMappingError),

    #[error("setup stage {stage} is out of range (module has {stages} stages)")]
    InvalidStage { stage: u8, stages: u8 },

    #[error("message delivered before setup completed")]
    NotInitialized,

    #[error("message arrived on channel {0}, which is not an inbound channel of this bridge")]
    UnexpectedChannel(GateId),
}
