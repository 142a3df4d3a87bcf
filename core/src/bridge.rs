//! # The MIxNET Bridge
//!
//! Connects a lower-stack network interface to an upper-stack network
//! layer. Lower gates face the interface, upper gates face the network
//! layer.
//!
//! ## Lifecycle
//! * **Stage 0**: bind the six channels, find the attached interface through
//!   `lower_data_out`, publish the address mapping ([`resolver`]) and
//!   register the interface with the upper stack ([`registrar`]).
//! * **Stage 1**: nothing for the bridge itself. Sibling components that
//!   query the interface directory run here and see the final entry.
//! * **Afterwards**: purely reactive. Each message is classified by the
//!   channel it arrived on:
//!     * `upper_in`: translated and forwarded down ([`upstream`]).
//!     * `lower_data_in`: translated and forwarded up ([`downstream`]).
//!     * `lower_control_in`: discarded, the upper stack has no counterpart.
//!
//! The address mapping published in stage 0 is withdrawn when the bridge is
//! dropped.

use std::rc::Rc;

use mixnet_common::config::Config;
use mixnet_common::error::BridgeError;
use mixnet_common::network::address::{ForeignAddress, NativeAddress};
use mixnet_common::network::channel::{ChannelBinding, ChannelId, Inbound};
use mixnet_common::network::interface::InterfaceHandle;
use mixnet_common::network::topology::{AttachedInterface, ComponentId, Topology};
use mixnet_protocols::message::Message;
use tracing::{debug, warn};

use crate::ports::inbound::SimModule;
use crate::ports::outbound::address_directory::SharedAddressDirectory;
use crate::ports::outbound::interface_directory::SharedInterfaceDirectory;
use crate::ports::outbound::outbox::Outbox;

mod downstream;
pub mod registrar;
pub mod resolver;
pub mod stats;
mod upstream;

use resolver::Link;
use stats::BridgeStats;

/// Setup stages the bridge exposes to the host scheduler.
pub const SETUP_STAGES: u8 = 2;

pub struct MixnetBridge {
    id: ComponentId,
    name: String,
    topology: Rc<Topology>,
    addresses: SharedAddressDirectory,
    interfaces: Option<SharedInterfaceDirectory>,
    config: Config,
    link: Option<Link>,
    handle: Option<InterfaceHandle>,
    stats: BridgeStats,
}

impl MixnetBridge {
    pub fn new(
        id: ComponentId,
        topology: Rc<Topology>,
        addresses: SharedAddressDirectory,
        config: Config,
    ) -> Self {
        let name = topology
            .component(id)
            .map(|component| component.name.clone())
            .unwrap_or_else(|| format!("bridge{}", id.0));
        Self {
            id,
            name,
            topology,
            addresses,
            interfaces: None,
            config,
            link: None,
            handle: None,
            stats: BridgeStats::default(),
        }
    }

    /// Nodes without an interface directory skip registration.
    pub fn with_interface_directory(mut self, interfaces: SharedInterfaceDirectory) -> Self {
        self.interfaces = Some(interfaces);
        self
    }

    /// Resolves and publishes this bridge's foreign address.
    ///
    /// Only the first successful call touches the topology and the address
    /// directory; later calls return the cached address.
    pub fn resolve(&mut self) -> Result<ForeignAddress, BridgeError> {
        if let Some(link) = &self.link {
            return Ok(link.mapping.foreign);
        }
        let link = resolver::resolve(&self.topology, self.id, self.addresses.as_ref())?;
        let foreign = link.mapping.foreign;
        self.link = Some(link);
        Ok(foreign)
    }

    /// Registers the attached interface with the upper stack, once.
    ///
    /// Returns `Ok(None)` when the node has no interface directory.
    pub fn register_interface(&mut self) -> Result<Option<InterfaceHandle>, BridgeError> {
        if self.handle.is_some() {
            return Ok(self.handle);
        }
        let link = self.link.as_ref().ok_or(BridgeError::NotInitialized)?;
        let Some(directory) = &self.interfaces else {
            warn!("{}: no interface directory, skipping registration", self.name);
            return Ok(None);
        };
        self.handle = Some(registrar::register(directory.as_ref(), link, &self.config));
        Ok(self.handle)
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn foreign_address(&self) -> Option<ForeignAddress> {
        self.link.as_ref().map(|link| link.mapping.foreign)
    }

    pub fn native_address(&self) -> Option<NativeAddress> {
        self.link.as_ref().map(|link| link.mapping.native)
    }

    pub fn attached(&self) -> Option<&AttachedInterface> {
        self.link.as_ref().map(|link| &link.attached)
    }

    pub fn channels(&self) -> Option<ChannelBinding> {
        self.link.as_ref().map(|link| link.channels)
    }

    pub fn interface_handle(&self) -> Option<InterfaceHandle> {
        self.handle
    }

    pub fn stats(&self) -> &BridgeStats {
        &self.stats
    }

    fn link(&self) -> Result<&Link, BridgeError> {
        self.link.as_ref().ok_or(BridgeError::NotInitialized)
    }

    /// Routes one inbound message.
    ///
    /// # Errors
    /// Only lifecycle misuse fails: a message before setup, or one delivered
    /// on a channel that is not an inbound channel of this bridge.
    pub fn dispatch(
        &mut self,
        channel: ChannelId,
        message: Message,
        outbox: &mut dyn Outbox,
    ) -> Result<(), BridgeError> {
        let channels = self.link()?.channels;
        match channels.classify(channel) {
            Some(Inbound::Upper) => self.on_upper_message(message, outbox),
            Some(Inbound::LowerData) => self.on_lower_message(message, outbox),
            Some(Inbound::LowerControl) => self.on_lower_control(message),
            None => return Err(BridgeError::UnexpectedChannel(channel)),
        }
        Ok(())
    }
}

impl SimModule for MixnetBridge {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_setup_stages(&self) -> u8 {
        SETUP_STAGES
    }

    fn on_setup(&mut self, stage: u8) -> anyhow::Result<()> {
        match stage {
            0 => {
                self.resolve()?;
                self.register_interface()?;
            }
            1 => debug!("{}: stage 1, nothing to do", self.name),
            _ => {
                return Err(BridgeError::InvalidStage {
                    stage,
                    stages: SETUP_STAGES,
                }
                .into());
            }
        }
        Ok(())
    }

    fn on_message(
        &mut self,
        channel: ChannelId,
        message: Message,
        outbox: &mut dyn Outbox,
    ) -> anyhow::Result<()> {
        Ok(self.dispatch(channel, message, outbox)?)
    }
}

impl Drop for MixnetBridge {
    fn drop(&mut self) {
        let Some(link) = &self.link else {
            return;
        };
        let mapping = link.mapping;
        if self.addresses.get(mapping.native) == Some(mapping.foreign) {
            self.addresses.remove(mapping.native);
            debug!("{}: withdrew {mapping}", self.name);
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
