use mixnet_common::network::channel::ChannelId;
use mixnet_protocols::message::Message;

use crate::ports::outbound::outbox::Outbox;

/// Keeps every emission in send order.
#[derive(Debug, Default)]
pub struct RecordingOutbox {
    sent: Vec<(ChannelId, Message)>,
}

impl RecordingOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[(ChannelId, Message)] {
        &self.sent
    }

    /// Messages sent on `channel`, in order.
    pub fn on(&self, channel: ChannelId) -> Vec<&Message> {
        self.sent
            .iter()
            .filter(|(sent_on, _)| *sent_on == channel)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    pub fn drain(&mut self) -> Vec<(ChannelId, Message)> {
        std::mem::take(&mut self.sent)
    }
}

impl Outbox for RecordingOutbox {
    fn send(&mut self, channel: ChannelId, message: Message) {
        self.sent.push((channel, message));
    }
}
