//! # Inbound Ports (Driving Actors)
//!
//! The host scheduler owns execution. It calls [`SimModule::on_setup`] once
//! per stage, stage-major across all modules of a node, and afterwards
//! delivers one message at a time through [`SimModule::on_message`]. A module
//! never initiates its own execution.

use mixnet_common::network::channel::ChannelId;
use mixnet_protocols::message::Message;

use crate::ports::outbound::outbox::Outbox;

pub trait SimModule {
    /// Name used in setup diagnostics.
    fn name(&self) -> &str;

    /// Number of setup stages this module takes part in.
    fn num_setup_stages(&self) -> u8;

    /// Runs one setup stage. Errors are fatal for the simulated node.
    fn on_setup(&mut self, stage: u8) -> anyhow::Result<()>;

    /// Handles one message that arrived on `channel`. Emissions go to
    /// `outbox` before this returns.
    fn on_message(
        &mut self,
        channel: ChannelId,
        message: Message,
        outbox: &mut dyn Outbox,
    ) -> anyhow::Result<()>;
}
