use std::collections::BTreeMap;

use mixnet_protocols::lower::ControlNotification;

/// Routing counters of one bridge.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BridgeStats {
    /// Frames sent on `lower_data_out`.
    pub forwarded_down: u64,
    /// Frames sent on `upper_out`.
    pub forwarded_up: u64,
    /// Upper-stack destinations with no directory entry, sent as broadcast.
    pub unresolved_destinations: u64,
    /// Frames that arrived without the control info their stack attaches.
    pub missing_control_info: u64,
    discarded: BTreeMap<ControlNotification, u64>,
}

impl BridgeStats {
    pub(crate) fn record_discard(&mut self, notification: ControlNotification) {
        *self.discarded.entry(notification).or_default() += 1;
    }

    pub fn discarded(&self, notification: ControlNotification) -> u64 {
        self.discarded.get(&notification).copied().unwrap_or(0)
    }

    pub fn discarded_total(&self) -> u64 {
        self.discarded.values().sum()
    }

    /// Discards per notification kind, in kind order.
    pub fn discards(&self) -> impl Iterator<Item = (ControlNotification, u64)> + '_ {
        self.discarded.iter().map(|(kind, count)| (*kind, *count))
    }
}
