//! # Channel Binding
//!
//! A bridge talks to its neighbours over six unidirectional channels, which
//! are gates of the bridge component in the static topology.

use crate::error::ConfigurationError;
use crate::network::topology::{ComponentId, GateId, Topology};

pub type ChannelId = GateId;

pub const UPPER_IN: &str = "upper_in";
pub const UPPER_OUT: &str = "upper_out";
pub const LOWER_DATA_IN: &str = "lower_data_in";
pub const LOWER_DATA_OUT: &str = "lower_data_out";
pub const LOWER_CONTROL_IN: &str = "lower_control_in";
pub const LOWER_CONTROL_OUT: &str = "lower_control_out";

/// Which of the three inbound channels delivered a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inbound {
    Upper,
    LowerData,
    LowerControl,
}

/// The bridge's channel ids, resolved once from the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBinding {
    pub upper_in: ChannelId,
    pub upper_out: ChannelId,
    pub lower_data_in: ChannelId,
    pub lower_data_out: ChannelId,
    pub lower_control_in: ChannelId,
    pub lower_control_out: ChannelId,
}

impl ChannelBinding {
    /// Looks up all six gates of `bridge`. Every gate must exist; only
    /// `lower_data_out` has to be connected for discovery to succeed.
    pub fn resolve(topology: &Topology, bridge: ComponentId) -> Result<Self, ConfigurationError> {
        let gate = |name: &str| topology.gate(bridge, name).map(|gate_ref| gate_ref.gate);
        Ok(Self {
            upper_in: gate(UPPER_IN)?,
            upper_out: gate(UPPER_OUT)?,
            lower_data_in: gate(LOWER_DATA_IN)?,
            lower_data_out: gate(LOWER_DATA_OUT)?,
            lower_control_in: gate(LOWER_CONTROL_IN)?,
            lower_control_out: gate(LOWER_CONTROL_OUT)?,
        })
    }

    /// Classifies an arrival. Outbound channels yield `None`.
    pub fn classify(&self, channel: ChannelId) -> Option<Inbound> {
        if channel == self.upper_in {
            Some(Inbound::Upper)
        } else if channel == self.lower_data_in {
            Some(Inbound::LowerData)
        } else if channel == self.lower_control_in {
            Some(Inbound::LowerControl)
        } else {
            None
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
