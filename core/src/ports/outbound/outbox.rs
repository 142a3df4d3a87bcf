use mixnet_common::network::channel::ChannelId;
use mixnet_protocols::message::Message;

/// Where a module's emissions go. Sending hands the message to the
/// substrate for delivery; it never blocks and never fails.
pub trait Outbox {
    fn send(&mut self, channel: ChannelId, message: Message);
}
